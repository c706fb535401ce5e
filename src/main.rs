//! eFarm CLI
//!
//! Command-line front end for the eFarm dashboard:
//! - Show the current reading and recommended actions
//! - Confirm actions and browse the activity log
//! - Export or clear the log
//! - Scan for, list and pair devices
//! - Run the live dashboard loop

use anyhow::Context;
use clap::{Parser, Subcommand};
use efarm::activity::EXPORT_FILE_NAME;
use efarm::config::{generate_default_config, Config, LoggingConfig};
use efarm::dashboard::{Dashboard, DashboardError, DashboardEvent};
use efarm::readings::load_or_fallback;
use efarm::storage::FileStore;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CARDS: [&str; 3] = ["card-1", "card-2", "card-3"];

#[derive(Parser)]
#[command(name = "efarm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Farm dashboard: field actions, activity log and sensors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the state directory
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current reading, recommended actions and paired sensor
    Status {
        /// Reading index to show (default: first)
        #[arg(short, long)]
        reading: Option<usize>,
    },

    /// List recommended actions for a reading
    Actions {
        #[arg(short, long)]
        reading: Option<usize>,
    },

    /// Confirm an action and record it in the activity log
    Do {
        /// Action id (water, skip-water, fertilize, pest-check)
        action: String,
    },

    /// Record a free-form note in the activity log
    Record {
        text: String,
    },

    /// Show the activity log, newest first
    Logs {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all activity log entries
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Export the activity log as JSON
    Export {
        /// Output file, or "-" for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List known devices
    Devices,

    /// Scan for nearby devices (simulated)
    Scan,

    /// Pair a sensor by name
    Pair {
        name: String,
    },

    /// Show action card completion
    Cards {
        /// Card ids (default: card-1 card-2 card-3)
        ids: Vec<String>,
    },

    /// Toggle an action card's completion flag
    Done {
        card: String,
    },

    /// Run the live dashboard, rotating readings until Ctrl-C
    Run {
        /// Stop after this many reading rotations
        #[arg(long)]
        rotations: Option<usize>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }

    init_tracing(&config.logging);

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let mut dash = open_dashboard(&config)?;

    let result = match cli.command {
        Commands::Status { reading } => {
            show_status(&mut dash, reading);
            Ok(())
        }

        Commands::Actions { reading } => {
            if let Some(index) = reading {
                dash.select_reading(index);
            }
            print_actions(&dash);
            Ok(())
        }

        Commands::Do { action } => dash.perform_action(&action).map(|entry| {
            println!("Action completed: {}", entry.action);
        }),

        Commands::Record { text } => dash.record(&text).map(|entry| {
            println!("Recorded: {}", entry);
        }),

        Commands::Logs { limit, json } => {
            let mut entries = dash.logs();
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No activity logs yet");
            } else {
                for entry in &entries {
                    println!("{:<22} {}", entry.timestamp, entry.action);
                }
            }
            Ok(())
        }

        Commands::Clear { yes } => {
            if !yes {
                eprintln!("This permanently deletes all activity logs.");
                eprintln!("Re-run with --yes to confirm.");
                std::process::exit(1);
            }
            dash.clear_logs().map(|_| {
                println!("Activity logs cleared successfully!");
            })
        }

        Commands::Export { output } => match output.as_deref() {
            Some(path) if path == Path::new("-") => {
                println!("{}", efarm::export_json(&dash.logs())?);
                Ok(())
            }
            path => {
                let path = path.unwrap_or_else(|| Path::new(EXPORT_FILE_NAME));
                dash.export_logs(path).map(|count| {
                    println!("Exported {} entries to {:?}", count, path);
                })
            }
        },

        Commands::Devices => {
            print_devices(&dash);
            Ok(())
        }

        Commands::Scan => {
            scan(&mut dash).await;
            Ok(())
        }

        Commands::Pair { name } => dash.pair_sensor(&name).map(|_| {
            println!("Sensor: {}", name.trim());
        }),

        Commands::Cards { ids } => {
            let ids: Vec<&str> = if ids.is_empty() {
                DEFAULT_CARDS.to_vec()
            } else {
                ids.iter().map(String::as_str).collect()
            };
            for id in ids {
                let mark = if dash.card_done(id) { "x" } else { " " };
                println!("[{}] {}", mark, id);
            }
            Ok(())
        }

        Commands::Done { card } => dash.toggle_card(&card).map(|done| {
            println!("{}: {}", card, if done { "done" } else { "not done" });
        }),

        Commands::Run { rotations } => run_live(&mut dash, rotations).await,

        Commands::Config { .. } => Ok(()),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_user_error() => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("efarm={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_dashboard(config: &Config) -> anyhow::Result<Dashboard<FileStore>> {
    let state_path = config.storage.state_path();
    let store = FileStore::open(&state_path)
        .with_context(|| format!("Cannot open state file {:?}", state_path))?;

    let data_file = config.dashboard.data_file.as_deref().map(Path::new);
    let readings = load_or_fallback(data_file);

    Ok(Dashboard::with_settings(store, readings, config.dashboard_settings()))
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn show_status(dash: &mut Dashboard<FileStore>, reading: Option<usize>) {
    if let Some(index) = reading {
        dash.select_reading(index);
    }

    println!("eFarm v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print_reading(dash);
    println!();
    print_actions(dash);
    println!();
    match dash.paired_sensor() {
        Some(name) => println!("Sensor: {}", name),
        None => println!("Sensor: not paired"),
    }
    println!("Activity log: {} entries", dash.activity_log().len());
}

fn print_reading(dash: &Dashboard<FileStore>) {
    match dash.current_reading() {
        Some(reading) => {
            println!(
                "Reading {}/{} ({})",
                dash.reading_index() + 1,
                dash.reading_count(),
                reading.timestamp.as_deref().unwrap_or("no timestamp")
            );
            println!("  Moisture:    {}%", reading.moisture);
            println!("  Nutrients:   {}", reading.nutrients);
            println!("  Temperature: {}°C", reading.temperature);
            println!("  Pest risk:   {}", if reading.pest_risk { "yes" } else { "no" });
        }
        None => println!("No readings available"),
    }
}

fn print_actions(dash: &Dashboard<FileStore>) {
    let actions = dash.recommended_actions();
    if actions.is_empty() {
        println!("No actions recommended.");
        return;
    }

    println!("Recommended actions:");
    for action in actions {
        println!("  {} {:<12} {} - {}", action.icon, action.id, action.title, action.hint);
    }
}

fn print_devices(dash: &Dashboard<FileStore>) {
    let paired = dash.paired_sensor();

    println!("{:<12} {:<22} {:<8} {}", "ID", "Name", "Status", "Signal");
    println!("{}", "-".repeat(56));
    for device in dash.devices().list() {
        println!(
            "{:<12} {:<22} {:<8} {}",
            device.id, device.name, device.status, device.signal
        );
    }

    if let Some(name) = paired {
        println!();
        println!("Paired: {}", name);
    }
}

async fn scan(dash: &mut Dashboard<FileStore>) {
    let delay = dash.devices().scan_delay();
    dash.begin_scan();
    println!("Scanning for devices...");

    tokio::select! {
        _ = tokio::time::sleep(delay) => {
            for event in dash.tick(delay) {
                match event {
                    DashboardEvent::DeviceDiscovered(device) => {
                        println!("Found {} ({}, {})", device.name, device.id, device.signal);
                    }
                    DashboardEvent::ScanFinished => println!("No new devices found"),
                    DashboardEvent::ReadingChanged { .. } => {}
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            dash.cancel_scan();
            println!("Scan cancelled");
            return;
        }
    }

    println!();
    print_devices(dash);
}

async fn run_live(dash: &mut Dashboard<FileStore>, rotations: Option<usize>) -> Result<(), DashboardError> {
    dash.start_rotation()?;
    print_reading(dash);
    print_actions(dash);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last = Instant::now();
    let mut rotated = 0usize;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let events = dash.tick(now - last);
                last = now;

                for event in events {
                    if let DashboardEvent::ReadingChanged { index } = event {
                        rotated += 1;
                        tracing::debug!(index, "Reading rotated");
                        println!();
                        print_reading(dash);
                        print_actions(dash);
                    }
                }

                if rotations.is_some_and(|max| rotated >= max) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    dash.stop_rotation();
    Ok(())
}
