//! Save/load for player records
//!
//! Every persisted record travels in a versioned JSON envelope. A missing,
//! corrupt, or future-versioned record falls back to the record's default,
//! so a bad save never surfaces as an error. Saving is explicit: callers
//! invoke it after each mutating call rather than relying on write-through
//! side effects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Progress;
use crate::Settings;
use crate::platform::KeyValueStore;
use crate::tutorial::TutorialProgress;

/// Envelope format version.
pub const SAVE_VERSION: u32 = 1;

pub const PROGRESS_KEY: &str = "pancake_flip_progress";
pub const SETTINGS_KEY: &str = "pancake_flip_settings";
pub const TUTORIAL_KEY: &str = "pancake_flip_tutorial";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

fn load_record<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let Some(json) = store.get(key) else {
        log::info!("no record under {key}, using defaults");
        return T::default();
    };
    match serde_json::from_str::<Envelope<T>>(&json) {
        Ok(envelope) if envelope.version == SAVE_VERSION => envelope.payload,
        Ok(envelope) => {
            log::warn!(
                "record {key} has unsupported version {}, using defaults",
                envelope.version
            );
            T::default()
        }
        Err(err) => {
            log::warn!("record {key} is corrupt ({err}), using defaults");
            T::default()
        }
    }
}

fn save_record<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, payload: &T) {
    let envelope = Envelope {
        version: SAVE_VERSION,
        payload,
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => store.set(key, &json),
        Err(err) => log::warn!("failed to encode record {key}: {err}"),
    }
}

/// Load progression, falling back to first-launch defaults.
pub fn load_progress(store: &dyn KeyValueStore) -> Progress {
    load_record(store, PROGRESS_KEY)
}

pub fn save_progress(store: &mut dyn KeyValueStore, progress: &Progress) {
    save_record(store, PROGRESS_KEY, progress);
}

pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    load_record(store, SETTINGS_KEY)
}

pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) {
    save_record(store, SETTINGS_KEY, settings);
}

pub fn load_tutorial(store: &dyn KeyValueStore) -> TutorialProgress {
    load_record(store, TUTORIAL_KEY)
}

pub fn save_tutorial(store: &mut dyn KeyValueStore, tutorial: &TutorialProgress) {
    save_record(store, TUTORIAL_KEY, tutorial);
}

/// Explicit reset: drop every record this crate owns.
pub fn clear_all(store: &mut dyn KeyValueStore) {
    store.remove(PROGRESS_KEY);
    store.remove(SETTINGS_KEY);
    store.remove(TUTORIAL_KEY);
    log::info!("all saved records cleared");
}
