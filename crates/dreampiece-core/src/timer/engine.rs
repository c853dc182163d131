//! Timer engine implementation.
//!
//! [`FocusTimer`] owns the [`TimerState`] and carries out the effects of each
//! transition against an injected [`Scheduler`] and [`Feedback`] surface.
//! It has no thread of its own: the caller drives it with [`FocusTimer::pump`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = FocusTimer::new(SystemScheduler::new(), surface, sessions);
//! timer.select_mode(FocusMode::Pomodoro);
//! timer.start();
//! // In a loop:
//! for event in timer.pump() {
//!     // persist SessionCompleted totals, log, ...
//! }
//! ```

use std::time::Duration;

use tracing::debug;

use super::display::{format_mmss, session_summary};
use super::feedback::{Achievement, Feedback};
use super::machine::{transition, Effect, Input, TimerState};
use super::mode::FocusMode;
use super::scheduler::{Scheduler, TaskId};
use crate::events::Event;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Engine timings that are not part of the mode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// Gap between a pomodoro phase ending and the next one starting.
    pub restart_delay: Duration,
    /// How long achievement notifications stay visible.
    pub notice_visible: Duration,
    pub notice_fade: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_secs(2),
            notice_visible: Duration::from_millis(2500),
            notice_fade: Duration::from_millis(500),
        }
    }
}

/// Focus timer shell around the pure state machine.
pub struct FocusTimer<S: Scheduler, F: Feedback> {
    state: TimerState,
    scheduler: S,
    feedback: F,
    settings: TimerSettings,
    tick_task: Option<TaskId>,
    restart_task: Option<TaskId>,
}

impl<S: Scheduler, F: Feedback> FocusTimer<S, F> {
    /// Create an idle timer in normal mode with the given session count.
    pub fn new(scheduler: S, feedback: F, sessions: u64) -> Self {
        Self::with_settings(scheduler, feedback, sessions, TimerSettings::default())
    }

    pub fn with_settings(scheduler: S, feedback: F, sessions: u64, settings: TimerSettings) -> Self {
        let mut timer = Self {
            state: TimerState::new(FocusMode::Normal, sessions),
            scheduler,
            feedback,
            settings,
            tick_task: None,
            restart_task: None,
        };
        timer.render();
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn display(&self) -> String {
        format_mmss(self.state.remaining_secs)
    }

    pub fn sessions(&self) -> u64 {
        self.state.sessions
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    pub fn has_active_tick(&self) -> bool {
        self.tick_task.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn select_mode(&mut self, mode: FocusMode) -> Vec<Event> {
        self.apply(Input::SelectMode(mode))
    }

    /// Minutes; ignored outside normal mode.
    pub fn set_manual_duration(&mut self, minutes: u32) -> Vec<Event> {
        self.apply(Input::SetManualDuration(minutes))
    }

    pub fn start(&mut self) -> Vec<Event> {
        self.apply(Input::Start)
    }

    pub fn pause(&mut self) -> Vec<Event> {
        self.apply(Input::Pause)
    }

    pub fn resume(&mut self) -> Vec<Event> {
        self.apply(Input::Resume)
    }

    pub fn reset(&mut self) -> Vec<Event> {
        self.apply(Input::Reset)
    }

    /// Fire every task the scheduler reports as due, in order.
    pub fn pump(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(id) = self.scheduler.next_due() {
            let input = if Some(id) == self.tick_task {
                Input::Tick
            } else if Some(id) == self.restart_task {
                self.restart_task = None;
                Input::RestartDue
            } else {
                debug!(?id, "ignoring stale scheduler task");
                continue;
            };
            events.extend(self.apply(input));
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, input: Input) -> Vec<Event> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, input);
        self.state = next;
        if input != Input::Tick {
            debug!(?input, status = ?self.state.status, remaining = self.state.remaining_secs, "timer transition");
        }

        let mut events = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartTicking => {
                    if let Some(old) = self.tick_task.take() {
                        self.scheduler.cancel(old);
                    }
                    self.tick_task = Some(self.scheduler.schedule_repeating(TICK_PERIOD));
                }
                Effect::StopTicking => {
                    if let Some(id) = self.tick_task.take() {
                        self.scheduler.cancel(id);
                    }
                }
                Effect::ScheduleRestart => {
                    if let Some(old) = self.restart_task.take() {
                        self.scheduler.cancel(old);
                    }
                    self.restart_task = Some(self.scheduler.schedule_once(self.settings.restart_delay));
                }
                Effect::CancelRestart => {
                    if let Some(id) = self.restart_task.take() {
                        self.scheduler.cancel(id);
                    }
                }
                Effect::Render => self.render(),
                Effect::Announce(message) => {
                    let achievement = Achievement {
                        message,
                        visible_for: self.settings.notice_visible,
                        fade: self.settings.notice_fade,
                    };
                    self.feedback.announce(&achievement);
                }
                Effect::TimeUp(message) => self.feedback.time_up(&message),
                Effect::Ambient(on) => self.feedback.set_ambient(on),
                Effect::Emit(event) => events.push(event),
            }
        }
        events
    }

    fn render(&mut self) {
        self.feedback.show_time(&format_mmss(self.state.remaining_secs));
        self.feedback.show_sessions(&session_summary(self.state.sessions));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::feedback::RecordingFeedback;
    use crate::timer::machine::TimerStatus;
    use crate::timer::mode::{Phase, POMODORO_BREAK_SECS, POMODORO_WORK_SECS};
    use crate::timer::scheduler::ManualScheduler;

    type TestTimer = FocusTimer<ManualScheduler, RecordingFeedback>;

    fn timer() -> TestTimer {
        FocusTimer::new(ManualScheduler::new(), RecordingFeedback::new(), 0)
    }

    fn advance(timer: &mut TestTimer, secs: u64) -> Vec<Event> {
        timer.scheduler_mut().advance(Duration::from_secs(secs));
        timer.pump()
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = timer();
        assert_eq!(timer.state().status, TimerStatus::Idle);
        assert_eq!(timer.display(), "60:00");

        assert_eq!(timer.start().len(), 1);
        assert_eq!(timer.state().status, TimerStatus::Running);

        assert_eq!(timer.pause().len(), 1);
        assert_eq!(timer.state().status, TimerStatus::Paused);

        assert_eq!(timer.resume().len(), 1);
        assert_eq!(timer.state().status, TimerStatus::Running);
    }

    #[test]
    fn double_start_keeps_one_tick() {
        let mut timer = timer();
        timer.start();
        assert!(timer.start().is_empty());
        assert_eq!(timer.scheduler().active_count(), 1);

        advance(&mut timer, 10);
        assert_eq!(timer.state().remaining_secs, 3600 - 10);
    }

    #[test]
    fn ticks_render_mmss() {
        let mut timer = timer();
        timer.set_manual_duration(2);
        timer.start();
        advance(&mut timer, 55);
        assert_eq!(timer.feedback().last_time(), Some("01:05"));
    }

    #[test]
    fn pause_cancels_tick_and_keeps_time() {
        let mut timer = timer();
        timer.start();
        advance(&mut timer, 30);
        timer.pause();
        assert_eq!(timer.scheduler().active_count(), 0);
        assert!(!timer.has_active_tick());

        advance(&mut timer, 600);
        assert_eq!(timer.state().remaining_secs, 3600 - 30);

        timer.resume();
        advance(&mut timer, 1);
        assert_eq!(timer.state().remaining_secs, 3600 - 31);
    }

    #[test]
    fn sprint_completion_alerts_once() {
        let mut timer = timer();
        timer.select_mode(FocusMode::Sprint);
        timer.start();
        let events = advance(&mut timer, 45 * 60 + 30);

        let completed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::SessionCompleted { .. }))
            .collect();
        assert_eq!(completed.len(), 1);
        assert_eq!(timer.sessions(), 1);
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.feedback().alerts.len(), 1);
        assert_eq!(timer.scheduler().active_count(), 0);
        assert!(timer
            .feedback()
            .messages()
            .contains(&"🔥 You’ve completed 1 focus session!"));
        assert_eq!(
            timer.feedback().sessions.last().map(String::as_str),
            Some("🎯 Sessions Completed: 1")
        );
    }

    #[test]
    fn pomodoro_auto_restarts_after_delay() {
        let mut timer = timer();
        timer.select_mode(FocusMode::Pomodoro);
        timer.start();

        let events = advance(&mut timer, POMODORO_WORK_SECS as u64);
        assert!(events.iter().any(|e| matches!(e, Event::BreakStarted { .. })));
        assert_eq!(timer.state().phase, Phase::OnBreak);
        assert_eq!(timer.state().status, TimerStatus::Completed);
        assert_eq!(timer.state().remaining_secs, POMODORO_BREAK_SECS);
        assert!(timer.feedback().alerts.is_empty());

        // Restart fires 2s later, then the break counts down.
        advance(&mut timer, 1);
        assert!(!timer.state().running());
        advance(&mut timer, 1);
        assert!(timer.state().running());
        assert_eq!(timer.state().remaining_secs, POMODORO_BREAK_SECS);

        let events = advance(&mut timer, POMODORO_BREAK_SECS as u64);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SessionCompleted { total: 1, .. })));
        assert_eq!(timer.state().phase, Phase::Working);
        assert_eq!(timer.state().remaining_secs, POMODORO_WORK_SECS);

        advance(&mut timer, 2);
        assert!(timer.state().running());
    }

    #[test]
    fn mode_change_during_restart_gap_cancels_restart() {
        let mut timer = timer();
        timer.select_mode(FocusMode::Pomodoro);
        timer.start();
        advance(&mut timer, POMODORO_WORK_SECS as u64);
        assert_eq!(timer.scheduler().active_count(), 1);

        timer.select_mode(FocusMode::Flow);
        assert_eq!(timer.scheduler().active_count(), 0);
        advance(&mut timer, 10);
        assert!(!timer.state().running());
        assert_eq!(timer.state().remaining_secs, 90 * 60);
    }

    #[test]
    fn announcements_use_configured_visibility() {
        let settings = TimerSettings {
            notice_visible: Duration::from_secs(4),
            ..TimerSettings::default()
        };
        let mut timer =
            FocusTimer::with_settings(ManualScheduler::new(), RecordingFeedback::new(), 0, settings);
        timer.select_mode(FocusMode::Zen);
        let achievement = timer.feedback().achievements.last().unwrap();
        assert_eq!(achievement.message, FocusMode::Zen.announcement());
        assert_eq!(achievement.visible_for, Duration::from_secs(4));
        assert!(timer.feedback().ambient_playing());

        timer.select_mode(FocusMode::Normal);
        assert!(!timer.feedback().ambient_playing());
    }

    #[test]
    fn works_without_a_surface() {
        use crate::timer::feedback::NoFeedback;
        let mut timer = FocusTimer::new(ManualScheduler::new(), NoFeedback, 3);
        timer.set_manual_duration(1);
        timer.start();
        timer.scheduler_mut().advance(Duration::from_secs(60));
        timer.pump();
        assert_eq!(timer.sessions(), 4);
    }

    #[test]
    fn idle_clock_time_is_not_counted_after_start() {
        let mut timer = timer();
        timer.scheduler_mut().advance(Duration::from_secs(100));
        timer.start();
        timer.pump();
        assert_eq!(timer.state().remaining_secs, 3600);

        advance(&mut timer, 1);
        assert_eq!(timer.state().remaining_secs, 3599);
    }
}
