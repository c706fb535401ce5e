//! Action card completion flags
//!
//! Each card's state lives under `done_<cardId>` as `"1"` or `"0"`.

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// Key prefix for card completion flags
pub const CARD_KEY_PREFIX: &str = "done_";

fn card_key(card_id: &str) -> StorageResult<String> {
    let card_id = card_id.trim();
    if card_id.is_empty() {
        return Err(StorageError::InvalidKey(card_id.to_string()));
    }
    Ok(format!("{}{}", CARD_KEY_PREFIX, card_id))
}

/// Whether a card is marked done. Missing or unreadable flags are "not done".
pub fn is_done<S: KeyValueStore + ?Sized>(store: &S, card_id: &str) -> bool {
    let Ok(key) = card_key(card_id) else {
        return false;
    };

    match store.get(&key) {
        Ok(value) => value.as_deref() == Some("1"),
        Err(e) => {
            tracing::warn!(card = %card_id, error = %e, "Could not read card state");
            false
        }
    }
}

/// Flip a card's completion flag and return the new state
pub fn toggle<S: KeyValueStore + ?Sized>(store: &mut S, card_id: &str) -> StorageResult<bool> {
    let key = card_key(card_id)?;
    let done = !is_done(store, card_id);
    store.set(&key, if done { "1" } else { "0" })?;
    tracing::debug!(card = %card_id, done, "Toggled card");
    Ok(done)
}

/// The subset of `card_ids` currently marked done, in input order
pub fn restore<'a, S: KeyValueStore + ?Sized>(store: &S, card_ids: &[&'a str]) -> Vec<&'a str> {
    card_ids
        .iter()
        .copied()
        .filter(|id| is_done(store, id))
        .collect()
}
