//! Text shown on the display surface.

/// Format remaining seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so a two hour countdown reads `120:00`.
pub fn format_mmss(remaining_secs: u32) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

pub fn session_summary(total: u64) -> String {
    format!("🎯 Sessions Completed: {total}")
}

pub fn completion_message(total: u64) -> String {
    let plural = if total > 1 { "s" } else { "" };
    format!("🔥 You’ve completed {total} focus session{plural}!")
}

pub const TIME_UP_MESSAGE: &str = "⏰ Time's up! Take a short break ☕";
pub const BREAK_STARTED_MESSAGE: &str = "✅ Pomodoro done! 5 min break ☕";
pub const BREAK_OVER_MESSAGE: &str = "🍅 Break over! Back to focus.";
