//! Keys used in the persistent key-value store.

/// Completed focus session count, integer as string.
pub const SESSIONS: &str = "sessions";
/// `"dark"` or `"light"`.
pub const THEME: &str = "theme";
/// JSON array of habits.
pub const HABITS: &str = "habits";
pub const CURRENT_CGPA: &str = "currentCgpa";
pub const TARGET_CGPA: &str = "targetCgpa";
/// ISO date, `YYYY-MM-DD`.
pub const EXAM_DATE: &str = "examDate";
pub const LAST_TAB: &str = "lastTab";
/// JSON `{wins, losses, ties}`.
pub const SCORE: &str = "score";
