use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Pomodoro work phase length in seconds.
pub const POMODORO_WORK_SECS: u32 = 25 * 60;
/// Pomodoro break phase length in seconds.
pub const POMODORO_BREAK_SECS: u32 = 5 * 60;

/// Named timer preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    /// 60 minutes, the only mode whose duration can be changed by hand.
    #[default]
    Normal,
    /// 25 minute work / 5 minute break, alternating.
    Pomodoro,
    Flow,
    Sprint,
    /// Plays the ambient loop while active.
    Zen,
    Extreme,
}

impl FocusMode {
    pub const ALL: [FocusMode; 6] = [
        FocusMode::Normal,
        FocusMode::Pomodoro,
        FocusMode::Flow,
        FocusMode::Sprint,
        FocusMode::Zen,
        FocusMode::Extreme,
    ];

    /// Full countdown length when the mode is selected.
    pub fn duration_secs(self) -> u32 {
        match self {
            FocusMode::Normal => 60 * 60,
            FocusMode::Pomodoro => POMODORO_WORK_SECS,
            FocusMode::Flow => 90 * 60,
            FocusMode::Sprint => 45 * 60,
            FocusMode::Zen => 60 * 60,
            FocusMode::Extreme => 120 * 60,
        }
    }

    /// One-shot notification shown when the mode is selected.
    pub fn announcement(self) -> &'static str {
        match self {
            FocusMode::Normal => "⏰ Normal Focus Mode Active",
            FocusMode::Pomodoro => "🍅 Pomodoro Mode — 25 min Focus!",
            FocusMode::Flow => "💧 Flow Mode — 90 min Deep Focus!",
            FocusMode::Sprint => "⚡ Sprint Focus — 45 min burst!",
            FocusMode::Zen => "🌙 Zen Mode — Stay calm & focused.",
            FocusMode::Extreme => "🔥 Extreme Mode — 2 hours, full throttle!",
        }
    }

    pub fn plays_ambient(self) -> bool {
        self == FocusMode::Zen
    }

    pub fn allows_manual_duration(self) -> bool {
        self == FocusMode::Normal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FocusMode::Normal => "normal",
            FocusMode::Pomodoro => "pomodoro",
            FocusMode::Flow => "flow",
            FocusMode::Sprint => "sprint",
            FocusMode::Zen => "zen",
            FocusMode::Extreme => "extreme",
        }
    }
}

impl fmt::Display for FocusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FocusMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown focus mode '{s}'"),
            })
    }
}

/// Pomodoro sub-state. Other modes always stay in `Working`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Working,
    OnBreak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_presets() {
        assert_eq!(FocusMode::Normal.duration_secs(), 3600);
        assert_eq!(FocusMode::Pomodoro.duration_secs(), 1500);
        assert_eq!(FocusMode::Flow.duration_secs(), 5400);
        assert_eq!(FocusMode::Sprint.duration_secs(), 2700);
        assert_eq!(FocusMode::Zen.duration_secs(), 3600);
        assert_eq!(FocusMode::Extreme.duration_secs(), 7200);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Zen".parse::<FocusMode>().unwrap(), FocusMode::Zen);
        assert_eq!(" sprint ".parse::<FocusMode>().unwrap(), FocusMode::Sprint);
        assert!("turbo".parse::<FocusMode>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for mode in FocusMode::ALL {
            assert_eq!(mode.to_string().parse::<FocusMode>().unwrap(), mode);
        }
    }

    #[test]
    fn only_zen_plays_ambient() {
        let ambient: Vec<_> = FocusMode::ALL
            .into_iter()
            .filter(|m| m.plays_ambient())
            .collect();
        assert_eq!(ambient, vec![FocusMode::Zen]);
    }
}
