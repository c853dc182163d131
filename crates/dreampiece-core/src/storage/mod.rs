mod config;
pub mod database;
pub mod keys;

pub use config::{CgpaConfig, Config, NotificationsConfig, TimerConfigSection};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the DreamPiece data directory, creating it if needed.
///
/// `DREAMPIECE_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/dreampiece[-dev]/`, with `DREAMPIECE_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("DREAMPIECE_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DREAMPIECE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dreampiece-dev")
            } else {
                base_dir.join("dreampiece")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Flat string-keyed persistent store.
///
/// Every feature module reads and writes through this trait so that tests
/// can run against an in-memory database.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
