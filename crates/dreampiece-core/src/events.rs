use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{FocusMode, Phase};

/// Every observable timer state change produces an Event.
/// The caller persists what it needs (the session count) from these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ModeSelected {
        mode: FocusMode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    DurationChanged {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: FocusMode,
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Pomodoro work phase ended; the break is loaded and will auto-start.
    BreakStarted {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Pomodoro break ended; the next work phase will auto-start.
    BreakEnded {
        at: DateTime<Utc>,
    },
    /// A focus interval finished. `total` is the new persistent count.
    SessionCompleted {
        mode: FocusMode,
        total: u64,
        at: DateTime<Utc>,
    },
    /// A non-pomodoro countdown reached zero.
    TimerCompleted {
        mode: FocusMode,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Timestamp of the change.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::ModeSelected { at, .. }
            | Event::DurationChanged { at, .. }
            | Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerResumed { at, .. }
            | Event::TimerReset { at, .. }
            | Event::BreakStarted { at, .. }
            | Event::BreakEnded { at }
            | Event::SessionCompleted { at, .. }
            | Event::TimerCompleted { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::SessionCompleted {
            mode: FocusMode::Sprint,
            total: 4,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SessionCompleted");
        assert_eq!(json["mode"], "sprint");
        assert_eq!(json["total"], 4);
    }
}
