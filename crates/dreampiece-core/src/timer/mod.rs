mod counter;
mod display;
mod engine;
mod feedback;
mod machine;
mod mode;
mod scheduler;

pub use counter::{load_sessions, persist_events, save_sessions};
pub use display::{completion_message, format_mmss, session_summary, TIME_UP_MESSAGE};
pub use engine::{FocusTimer, TimerSettings};
pub use feedback::{Achievement, Feedback, NoFeedback, RecordingFeedback};
pub use machine::{transition, Effect, Input, TimerConfig, TimerState, TimerStatus};
pub use mode::{FocusMode, Phase, POMODORO_BREAK_SECS, POMODORO_WORK_SECS};
pub use scheduler::{ManualScheduler, Scheduler, SystemScheduler, TaskId};
