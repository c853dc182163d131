use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{keys, KeyValueStore};

/// The focus timer is hidden while this tab is open.
pub const GAME_TAB: &str = "game";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabView {
    pub tab: String,
    pub focus_timer_visible: bool,
}

impl TabView {
    fn for_tab(tab: &str) -> Self {
        Self {
            tab: tab.to_string(),
            focus_timer_visible: tab != GAME_TAB,
        }
    }
}

/// Remember `tab` as the last opened one.
pub fn switch_tab<K: KeyValueStore + ?Sized>(store: &K, tab: &str) -> Result<TabView> {
    let tab = tab.trim();
    if tab.is_empty() {
        return Err(ValidationError::Empty {
            field: keys::LAST_TAB.into(),
        }
        .into());
    }
    store.set(keys::LAST_TAB, tab)?;
    Ok(TabView::for_tab(tab))
}

pub fn last_tab<K: KeyValueStore + ?Sized>(store: &K) -> Result<Option<TabView>> {
    Ok(store.get(keys::LAST_TAB)?.map(|tab| TabView::for_tab(&tab)))
}
