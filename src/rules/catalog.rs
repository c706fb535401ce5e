//! Action catalog
//!
//! A declarative table of recommended field actions. Each rule pairs a pure
//! predicate over a [`SensorReading`] with display metadata. Rules are
//! independent: several may fire for the same reading, and results keep
//! the declaration order of the table.

use crate::readings::SensorReading;
use serde::Serialize;

/// Predicate deciding whether a rule applies to a reading
pub type Condition = fn(&SensorReading) -> bool;

/// A static condition → action pairing
#[derive(Clone, Serialize)]
pub struct ActionRule {
    /// Unique identifier, e.g. "skip-water"
    pub id: &'static str,
    /// Display icon
    pub icon: &'static str,
    /// Short action title
    pub title: &'static str,
    /// One-line instruction
    pub hint: &'static str,
    #[serde(skip)]
    pub condition: Condition,
}

impl ActionRule {
    pub const fn new(
        id: &'static str,
        icon: &'static str,
        title: &'static str,
        hint: &'static str,
        condition: Condition,
    ) -> Self {
        Self {
            id,
            icon,
            title,
            hint,
            condition,
        }
    }

    /// Whether this rule applies to `reading`
    pub fn matches(&self, reading: &SensorReading) -> bool {
        (self.condition)(reading)
    }

    /// Text recorded in the activity log when the action is confirmed
    pub fn log_line(&self) -> String {
        format!("{} - {}", self.title, self.hint)
    }
}

impl std::fmt::Debug for ActionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRule")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Rules whose condition holds for `reading`, in table order
pub fn evaluate<'a>(rules: &'a [ActionRule], reading: &SensorReading) -> Vec<&'a ActionRule> {
    rules.iter().filter(|rule| rule.matches(reading)).collect()
}

fn needs_water(r: &SensorReading) -> bool {
    r.moisture < 35.0
}

fn moisture_adequate(r: &SensorReading) -> bool {
    r.moisture >= 35.0
}

fn needs_fertilizer(r: &SensorReading) -> bool {
    r.nutrients < 3.0
}

fn pest_risk(r: &SensorReading) -> bool {
    r.pest_risk
}

/// Built-in rule table
pub const DEFAULT_RULES: [ActionRule; 4] = [
    ActionRule::new(
        "water",
        "💧",
        "Irrigate field",
        "Light spray for 15 minutes",
        needs_water,
    ),
    ActionRule::new(
        "skip-water",
        "🚫",
        "Skip watering",
        "Soil moisture is adequate",
        moisture_adequate,
    ),
    ActionRule::new(
        "fertilize",
        "🌾",
        "Apply fertilizer",
        "NPK blend - 100g per plant",
        needs_fertilizer,
    ),
    ActionRule::new(
        "pest-check",
        "🐛",
        "Pest inspection",
        "Check leaves and stems",
        pest_risk,
    ),
];

/// An ordered, immutable set of rules
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    rules: Vec<ActionRule>,
}

impl ActionCatalog {
    pub fn new(rules: Vec<ActionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ActionRule] {
        &self.rules
    }

    /// Look up a rule by id
    pub fn find(&self, id: &str) -> Option<&ActionRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Rules that apply to `reading`, in table order
    pub fn evaluate(&self, reading: &SensorReading) -> Vec<&ActionRule> {
        evaluate(&self.rules, reading)
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rules: &[&ActionRule]) -> Vec<&'static str> {
        rules.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_adequate_moisture_with_pests() {
        let catalog = ActionCatalog::default();
        let reading = SensorReading::new(42.0, 4.0, 24.0, true);
        assert_eq!(ids(&catalog.evaluate(&reading)), vec!["skip-water", "pest-check"]);
    }

    #[test]
    fn test_dry_and_hungry_fires_together() {
        let catalog = ActionCatalog::default();
        let reading = SensorReading::new(28.0, 2.0, 28.0, false);
        assert_eq!(ids(&catalog.evaluate(&reading)), vec!["water", "fertilize"]);
    }

    #[test]
    fn test_threshold_boundaries() {
        let catalog = ActionCatalog::default();
        let reading = SensorReading::new(35.0, 3.0, 26.0, false);
        assert_eq!(ids(&catalog.evaluate(&reading)), vec!["skip-water"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let rules = [ActionRule::new("never", "", "Never", "", |_| false)];
        let reading = SensorReading::new(10.0, 1.0, 10.0, true);
        assert!(evaluate(&rules, &reading).is_empty());
        assert!(evaluate(&[], &reading).is_empty());
    }

    #[test]
    fn test_order_follows_table_and_all_results_match() {
        let readings = [
            SensorReading::new(0.0, 0.0, 0.0, true),
            SensorReading::new(34.9, 2.9, 40.0, false),
            SensorReading::new(100.0, 10.0, -5.0, true),
            SensorReading::new(f64::NAN, f64::NAN, 0.0, false),
        ];

        let rules = DEFAULT_RULES;
        for reading in &readings {
            let fired = evaluate(&rules, reading);
            assert!(fired.iter().all(|r| r.matches(reading)));

            let positions: Vec<usize> = fired
                .iter()
                .map(|r| rules.iter().position(|d| d.id == r.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));

            let expected = rules.iter().filter(|r| r.matches(reading)).count();
            assert_eq!(fired.len(), expected);
        }
    }

    #[test]
    fn test_find_and_log_line() {
        let catalog = ActionCatalog::default();
        let rule = catalog.find("fertilize").unwrap();
        assert_eq!(rule.log_line(), "Apply fertilizer - NPK blend - 100g per plant");
        assert!(catalog.find("harvest").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = ActionCatalog::default();
        for (i, rule) in catalog.rules().iter().enumerate() {
            assert!(catalog.rules()[i + 1..].iter().all(|r| r.id != rule.id));
        }
    }
}
