//! Pure focus timer state machine.
//!
//! [`transition`] takes the current [`TimerState`] and one [`Input`] and
//! returns the next state plus the [`Effect`]s the shell must carry out.
//! Nothing here touches a clock, a scheduler, or a display.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Running | Idle
//! ```
//!
//! In pomodoro mode, `Completed` is the two second gap between phases:
//! the next phase is already loaded and a restart is pending.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::display::{
    completion_message, BREAK_OVER_MESSAGE, BREAK_STARTED_MESSAGE, TIME_UP_MESSAGE,
};
use super::mode::{FocusMode, Phase, POMODORO_BREAK_SECS, POMODORO_WORK_SECS};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    /// Countdown reached zero and no action has been taken since.
    Completed,
}

/// Active mode and its countdown length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub mode: FocusMode,
    pub duration_secs: u32,
}

impl TimerConfig {
    pub fn for_mode(mode: FocusMode) -> Self {
        Self {
            mode,
            duration_secs: mode.duration_secs(),
        }
    }
}

/// Everything the timer knows. Owned by the shell, replaced on every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub config: TimerConfig,
    pub remaining_secs: u32,
    pub status: TimerStatus,
    pub phase: Phase,
    /// Completed focus sessions, mirrored from the persistent counter.
    pub sessions: u64,
    /// Whether the ambient loop is currently playing.
    pub ambient: bool,
    /// A pomodoro phase restart is scheduled.
    pub restart_pending: bool,
}

impl TimerState {
    pub fn new(mode: FocusMode, sessions: u64) -> Self {
        let config = TimerConfig::for_mode(mode);
        Self {
            config,
            remaining_secs: config.duration_secs,
            status: TimerStatus::Idle,
            phase: Phase::Working,
            sessions,
            ambient: false,
            restart_pending: false,
        }
    }

    pub fn mode(&self) -> FocusMode {
        self.config.mode
    }

    pub fn running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_break(&self) -> bool {
        self.phase == Phase::OnBreak
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(FocusMode::Normal, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    SelectMode(FocusMode),
    /// Minutes; honoured only in normal mode.
    SetManualDuration(u32),
    Start,
    Pause,
    Resume,
    Reset,
    /// One second elapsed on the active tick.
    Tick,
    /// The pomodoro restart delay elapsed.
    RestartDue,
}

/// Side effect requested by a transition, in the order it must happen.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartTicking,
    StopTicking,
    ScheduleRestart,
    CancelRestart,
    /// Push the current time text and session summary to the display.
    Render,
    Announce(String),
    /// Blocking acknowledgement at the end of a non-pomodoro countdown.
    TimeUp(String),
    Ambient(bool),
    Emit(Event),
}

/// Apply one input to the state.
pub fn transition(mut state: TimerState, input: Input) -> (TimerState, Vec<Effect>) {
    let mut effects = Vec::new();

    match input {
        Input::SelectMode(mode) => {
            halt(&mut state, &mut effects);
            state.config = TimerConfig::for_mode(mode);
            state.remaining_secs = state.config.duration_secs;
            state.status = TimerStatus::Idle;
            state.phase = Phase::Working;
            set_ambient(&mut state, &mut effects, mode.plays_ambient());
            effects.push(Effect::Announce(mode.announcement().to_string()));
            effects.push(Effect::Render);
            effects.push(Effect::Emit(Event::ModeSelected {
                mode,
                duration_secs: state.config.duration_secs,
                at: Utc::now(),
            }));
        }
        Input::SetManualDuration(minutes) => {
            if !state.mode().allows_manual_duration() || minutes == 0 {
                return (state, effects);
            }
            let duration_secs = minutes.saturating_mul(60);
            state.config.duration_secs = duration_secs;
            state.remaining_secs = duration_secs;
            if state.status == TimerStatus::Completed {
                state.status = TimerStatus::Idle;
            }
            effects.push(Effect::Render);
            effects.push(Effect::Emit(Event::DurationChanged {
                duration_secs,
                at: Utc::now(),
            }));
        }
        Input::Start | Input::Resume => {
            if state.running() {
                return (state, effects);
            }
            if state.restart_pending {
                state.restart_pending = false;
                effects.push(Effect::CancelRestart);
            }
            if state.remaining_secs == 0 {
                state.remaining_secs = state.config.duration_secs;
            }
            state.status = TimerStatus::Running;
            let ambient = state.mode().plays_ambient();
            set_ambient(&mut state, &mut effects, ambient);
            effects.push(Effect::StartTicking);
            effects.push(Effect::Render);
            let at = Utc::now();
            effects.push(Effect::Emit(if input == Input::Start {
                Event::TimerStarted {
                    mode: state.mode(),
                    phase: state.phase,
                    remaining_secs: state.remaining_secs,
                    at,
                }
            } else {
                Event::TimerResumed {
                    remaining_secs: state.remaining_secs,
                    at,
                }
            }));
        }
        Input::Pause => {
            if !state.running() && !state.restart_pending {
                return (state, effects);
            }
            halt(&mut state, &mut effects);
            state.status = TimerStatus::Paused;
            set_ambient(&mut state, &mut effects, false);
            effects.push(Effect::Render);
            effects.push(Effect::Emit(Event::TimerPaused {
                remaining_secs: state.remaining_secs,
                at: Utc::now(),
            }));
        }
        Input::Reset => {
            halt(&mut state, &mut effects);
            if state.phase == Phase::OnBreak {
                state.config.duration_secs = POMODORO_WORK_SECS;
            }
            state.phase = Phase::Working;
            state.status = TimerStatus::Idle;
            state.remaining_secs = state.config.duration_secs;
            set_ambient(&mut state, &mut effects, false);
            effects.push(Effect::Render);
            effects.push(Effect::Emit(Event::TimerReset {
                remaining_secs: state.remaining_secs,
                at: Utc::now(),
            }));
        }
        Input::Tick => {
            if !state.running() {
                return (state, effects);
            }
            state.remaining_secs = state.remaining_secs.saturating_sub(1);
            effects.push(Effect::Render);
            if state.remaining_secs == 0 {
                complete(&mut state, &mut effects);
            }
        }
        Input::RestartDue => {
            if !state.restart_pending {
                return (state, effects);
            }
            state.restart_pending = false;
            state.status = TimerStatus::Running;
            effects.push(Effect::StartTicking);
            effects.push(Effect::Render);
            effects.push(Effect::Emit(Event::TimerStarted {
                mode: state.mode(),
                phase: state.phase,
                remaining_secs: state.remaining_secs,
                at: Utc::now(),
            }));
        }
    }

    (state, effects)
}

/// Cancel whatever is scheduled: the tick if running, the restart if pending.
fn halt(state: &mut TimerState, effects: &mut Vec<Effect>) {
    if state.running() {
        effects.push(Effect::StopTicking);
    }
    if state.restart_pending {
        state.restart_pending = false;
        effects.push(Effect::CancelRestart);
    }
}

fn set_ambient(state: &mut TimerState, effects: &mut Vec<Effect>, on: bool) {
    if state.ambient != on {
        state.ambient = on;
        effects.push(Effect::Ambient(on));
    }
}

fn complete(state: &mut TimerState, effects: &mut Vec<Effect>) {
    effects.push(Effect::StopTicking);
    state.status = TimerStatus::Completed;
    let mode = state.mode();
    let at = Utc::now();

    if mode == FocusMode::Pomodoro {
        match state.phase {
            Phase::Working => {
                state.phase = Phase::OnBreak;
                state.config.duration_secs = POMODORO_BREAK_SECS;
                state.remaining_secs = POMODORO_BREAK_SECS;
                effects.push(Effect::Announce(BREAK_STARTED_MESSAGE.to_string()));
                effects.push(Effect::Emit(Event::BreakStarted {
                    duration_secs: POMODORO_BREAK_SECS,
                    at,
                }));
            }
            Phase::OnBreak => {
                state.phase = Phase::Working;
                state.config.duration_secs = POMODORO_WORK_SECS;
                state.remaining_secs = POMODORO_WORK_SECS;
                state.sessions += 1;
                effects.push(Effect::Emit(Event::SessionCompleted {
                    mode,
                    total: state.sessions,
                    at,
                }));
                effects.push(Effect::Announce(BREAK_OVER_MESSAGE.to_string()));
                effects.push(Effect::Emit(Event::BreakEnded { at }));
            }
        }
        state.restart_pending = true;
        effects.push(Effect::ScheduleRestart);
        effects.push(Effect::Render);
        return;
    }

    state.sessions += 1;
    effects.push(Effect::Emit(Event::SessionCompleted {
        mode,
        total: state.sessions,
        at,
    }));
    effects.push(Effect::Render);
    effects.push(Effect::Announce(completion_message(state.sessions)));
    set_ambient(state, effects, false);
    effects.push(Effect::Emit(Event::TimerCompleted { mode, at }));
    effects.push(Effect::TimeUp(TIME_UP_MESSAGE.to_string()));
}
