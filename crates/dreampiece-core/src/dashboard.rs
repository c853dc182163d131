//! Everything shown when the widget first opens, gathered in one pass.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cgpa::{self, CgpaKind};
use crate::error::Result;
use crate::exam;
use crate::game::Score;
use crate::habits::{HabitStats, HabitTracker};
use crate::quotes::daily_quote;
use crate::storage::{Config, KeyValueStore};
use crate::tabs::{self, TabView};
use crate::theme::{self, Theme};
use crate::timer::{format_mmss, load_sessions, session_summary, FocusMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub current_cgpa: String,
    pub target_cgpa: String,
    pub habits: HabitStats,
    pub habit_count: usize,
    pub days_until_exam: i64,
    pub quote: String,
    pub theme: Theme,
    pub theme_toggle_label: String,
    pub sessions: u64,
    pub sessions_summary: String,
    /// Countdown text for the configured startup mode.
    pub timer_display: String,
    pub score: String,
    pub last_tab: Option<TabView>,
}

impl Dashboard {
    /// Load every panel. `today` is the local calendar date.
    pub fn load<K, R>(
        store: &K,
        config: &Config,
        now: DateTime<Utc>,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Self>
    where
        K: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        let current = cgpa::load(store, CgpaKind::Current, &config.cgpa)?;
        let target = cgpa::load(store, CgpaKind::Target, &config.cgpa)?;
        let tracker = HabitTracker::load(store, now)?;
        let theme = theme::load_theme(store)?;
        let sessions = load_sessions(store)?;

        let mode = config.timer.default_mode;
        let startup_secs = if mode == FocusMode::Normal && config.timer.normal_minutes > 0 {
            config.timer.normal_minutes.saturating_mul(60)
        } else {
            mode.duration_secs()
        };

        Ok(Self {
            current_cgpa: current.display(),
            target_cgpa: target.display(),
            habits: tracker.stats(today, &Local),
            habit_count: tracker.len(),
            days_until_exam: exam::days_until_stored(store, today)?,
            quote: daily_quote(rng).to_string(),
            theme,
            theme_toggle_label: theme.toggle_label().to_string(),
            sessions,
            sessions_summary: session_summary(sessions),
            timer_display: format_mmss(startup_secs),
            score: Score::load(store)?.summary(),
            last_tab: tabs::last_tab(store)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng_from_seed;
    use crate::storage::{keys, Database};

    #[test]
    fn fresh_store_shows_defaults() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let dash = Dashboard::load(&db, &Config::default(), now, today, &mut rng_from_seed(Some(3))).unwrap();

        assert_eq!(dash.current_cgpa, "5.9");
        assert_eq!(dash.target_cgpa, "8.5");
        assert_eq!(dash.habit_count, 3);
        assert_eq!(dash.days_until_exam, 0);
        assert_eq!(dash.theme, Theme::Light);
        assert_eq!(dash.sessions_summary, "🎯 Sessions Completed: 0");
        assert_eq!(dash.timer_display, "60:00");
        assert_eq!(dash.score, "Wins: 0, Losses: 0, Ties: 0");
        assert!(dash.last_tab.is_none());
    }

    #[test]
    fn reflects_stored_state() {
        let db = Database::open_memory().unwrap();
        db.set(keys::SESSIONS, "12").unwrap();
        db.set(keys::THEME, "dark").unwrap();
        db.set(keys::EXAM_DATE, "2026-10-29").unwrap();
        let mut config = Config::default();
        config.timer.default_mode = FocusMode::Extreme;

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let dash = Dashboard::load(&db, &config, Utc::now(), today, &mut rng_from_seed(None)).unwrap();
        assert_eq!(dash.sessions, 12);
        assert_eq!(dash.theme_toggle_label, "☀️ Light Mode");
        assert_eq!(dash.days_until_exam, 10);
        assert_eq!(dash.timer_display, "120:00");
    }
}
