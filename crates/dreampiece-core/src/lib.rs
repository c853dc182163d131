//! # DreamPiece Core Library
//!
//! Business logic for the DreamPiece productivity widget: a focus timer with
//! preset modes, a habit checklist, CGPA tracking, an exam countdown, a theme
//! toggle, daily quotes and a rock-paper-scissors break game. The CLI is a
//! thin surface over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a pure state machine ([`transition`]) wrapped by
//!   [`FocusTimer`], which runs its effects against an injected
//!   [`Scheduler`] and [`Feedback`] surface
//! - **Storage**: a flat key-value store ([`KeyValueStore`]) backed by SQLite,
//!   and TOML configuration
//! - **Features**: habits, CGPA, exam, theme, quotes, game, tabs, each reading
//!   and writing its own keys
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: timer shell
//! - [`Database`]: persistent key-value store
//! - [`Config`]: application configuration
//! - [`Dashboard`]: everything shown on startup

pub mod cgpa;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod exam;
pub mod game;
pub mod habits;
pub mod quotes;
pub mod storage;
pub mod tabs;
pub mod theme;
pub mod timer;

pub use cgpa::{format_cgpa, CgpaKind, CgpaRecord};
pub use dashboard::Dashboard;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use game::{Move, Outcome, Round, Score};
pub use habits::{Habit, HabitStats, HabitTracker};
pub use storage::{Config, Database, KeyValueStore};
pub use tabs::TabView;
pub use theme::Theme;
pub use timer::{
    format_mmss, transition, Feedback, FocusMode, FocusTimer, ManualScheduler, Phase, Scheduler,
    SystemScheduler, TimerSettings, TimerState, TimerStatus,
};
