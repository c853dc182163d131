//! Output port for the focus timer.
//!
//! The timer pushes plain data through [`Feedback`]; how it is rendered is up
//! to the implementor. Every method has a no-op default so a surface that
//! lacks an element simply ignores it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One-shot notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub message: String,
    /// How long the notification stays on screen.
    pub visible_for: Duration,
    /// Fade-in/out transition length.
    pub fade: Duration,
}

pub trait Feedback {
    /// Remaining time, already formatted as `MM:SS`.
    fn show_time(&mut self, _text: &str) {}

    fn show_sessions(&mut self, _summary: &str) {}

    fn announce(&mut self, _achievement: &Achievement) {}

    /// Blocking acknowledgement. Implementations may wait for the user.
    fn time_up(&mut self, _message: &str) {}

    /// Start or stop the ambient sound loop.
    fn set_ambient(&mut self, _playing: bool) {}
}

/// Surface with nothing attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl Feedback for NoFeedback {}

/// Records everything pushed to it.
#[derive(Debug, Default, Clone)]
pub struct RecordingFeedback {
    pub times: Vec<String>,
    pub sessions: Vec<String>,
    pub achievements: Vec<Achievement>,
    pub alerts: Vec<String>,
    pub ambient: Vec<bool>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_time(&self) -> Option<&str> {
        self.times.last().map(String::as_str)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.achievements.iter().map(|a| a.message.as_str()).collect()
    }

    /// Whether the ambient loop is playing according to the last call.
    pub fn ambient_playing(&self) -> bool {
        self.ambient.last().copied().unwrap_or(false)
    }
}

impl Feedback for RecordingFeedback {
    fn show_time(&mut self, text: &str) {
        self.times.push(text.to_string());
    }

    fn show_sessions(&mut self, summary: &str) {
        self.sessions.push(summary.to_string());
    }

    fn announce(&mut self, achievement: &Achievement) {
        self.achievements.push(achievement.clone());
    }

    fn time_up(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_ambient(&mut self, playing: bool) {
        self.ambient.push(playing);
    }
}

impl<F: Feedback + ?Sized> Feedback for &mut F {
    fn show_time(&mut self, text: &str) {
        (**self).show_time(text)
    }

    fn show_sessions(&mut self, summary: &str) {
        (**self).show_sessions(summary)
    }

    fn announce(&mut self, achievement: &Achievement) {
        (**self).announce(achievement)
    }

    fn time_up(&mut self, message: &str) {
        (**self).time_up(message)
    }

    fn set_ambient(&mut self, playing: bool) {
        (**self).set_ambient(playing)
    }
}
