use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle button, naming the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "☀️ Light Mode",
            Theme::Light => "🌙 Dark Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only an explicit `"dark"` selects the dark theme.
pub fn load_theme<K: KeyValueStore + ?Sized>(store: &K) -> Result<Theme> {
    Ok(match store.get(keys::THEME)?.as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    })
}

/// Flip the stored theme and return the new one.
pub fn toggle_theme<K: KeyValueStore + ?Sized>(store: &K) -> Result<Theme> {
    let next = load_theme(store)?.toggled();
    store.set(keys::THEME, next.as_str())?;
    Ok(next)
}
