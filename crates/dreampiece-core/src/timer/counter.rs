//! Persistent completed-session counter.
//!
//! The engine only reports new totals through [`Event::SessionCompleted`];
//! writing them is the caller's job via [`persist_events`].

use tracing::{info, warn};

use crate::error::Result;
use crate::events::Event;
use crate::storage::{keys, KeyValueStore};

/// Read the stored count. A malformed value is coerced to zero and
/// overwritten.
pub fn load_sessions<K: KeyValueStore + ?Sized>(store: &K) -> Result<u64> {
    match store.get(keys::SESSIONS)? {
        None => Ok(0),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(count) => Ok(count),
            Err(_) => {
                warn!(value = %raw, "malformed session count, resetting to 0");
                save_sessions(store, 0)?;
                Ok(0)
            }
        },
    }
}

pub fn save_sessions<K: KeyValueStore + ?Sized>(store: &K, total: u64) -> Result<()> {
    store.set(keys::SESSIONS, &total.to_string())
}

/// Write every session total found in `events`.
pub fn persist_events<K: KeyValueStore + ?Sized>(store: &K, events: &[Event]) -> Result<()> {
    for event in events {
        if let Event::SessionCompleted { total, mode, .. } = event {
            save_sessions(store, *total)?;
            info!(%mode, total, "focus session completed");
        }
    }
    Ok(())
}
