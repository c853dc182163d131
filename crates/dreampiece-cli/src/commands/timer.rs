//! Focus timer commands.
//!
//! `timer run` drives a [`FocusTimer`] on a single-threaded tokio runtime,
//! multiplexing the scheduler pump, stdin commands and Ctrl-C.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use dreampiece_core::timer::{
    format_mmss, load_sessions, persist_events, session_summary, Achievement, Feedback, FocusMode,
    FocusTimer, SystemScheduler,
};
use dreampiece_core::{Config, Database, Event};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

const PUMP_PERIOD: Duration = Duration::from_millis(100);

const HELP: &str = "commands: s start | p pause | r resume | x reset | m <mode> | d <minutes> | q quit";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer interactively
    Run {
        /// Focus mode (normal, pomodoro, flow, sprint, zen, extreme)
        #[arg(long)]
        mode: Option<FocusMode>,
        /// Custom duration in minutes (normal mode only)
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Print the completed session count
    Sessions {
        #[arg(long)]
        json: bool,
    },
    /// List the focus modes and their durations
    Modes,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { mode, minutes } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_interactive(mode, minutes))
        }
        TimerAction::Sessions { json } => {
            let db = Database::open()?;
            let total = load_sessions(&db)?;
            if json {
                println!("{}", serde_json::json!({ "sessions": total }));
            } else {
                println!("{}", session_summary(total));
            }
            Ok(())
        }
        TimerAction::Modes => {
            for mode in FocusMode::ALL {
                println!(
                    "{:<9} {:>6}  {}",
                    mode.as_str(),
                    format_mmss(mode.duration_secs()),
                    mode.announcement()
                );
            }
            Ok(())
        }
    }
}

/// One line typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    Mode(FocusMode),
    Minutes(u32),
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    let command = match (head, arg) {
        ("s" | "start", None) => Command::Start,
        ("p" | "pause", None) => Command::Pause,
        ("r" | "resume", None) => Command::Resume,
        ("x" | "reset", None) => Command::Reset,
        ("q" | "quit", None) => Command::Quit,
        ("m" | "mode", Some(mode)) => Command::Mode(mode.parse().map_err(|e| format!("{e}"))?),
        ("d" | "duration", Some(minutes)) => Command::Minutes(
            minutes
                .parse()
                .map_err(|_| format!("'{minutes}' is not a whole number of minutes"))?,
        ),
        _ => return Err(format!("unknown command '{}'. {HELP}", line.trim())),
    };
    Ok(Some(command))
}

async fn run_interactive(
    mode: Option<FocusMode>,
    minutes: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let sessions = load_sessions(&db)?;

    let mut timer = FocusTimer::with_settings(
        SystemScheduler::new(),
        TerminalFeedback::default(),
        sessions,
        config.timer_settings(),
    );

    let mode = mode.unwrap_or(config.timer.default_mode);
    let mut events = timer.select_mode(mode);
    let minutes = minutes.or_else(|| {
        (mode == FocusMode::Normal && config.timer.normal_minutes != 60)
            .then_some(config.timer.normal_minutes)
    });
    if let Some(minutes) = minutes {
        if !mode.allows_manual_duration() {
            eprintln!("{mode} mode has a fixed duration; ignoring --minutes");
        }
        events.extend(timer.set_manual_duration(minutes));
    }
    events.extend(timer.start());
    persist_events(&db, &events)?;
    eprintln!("{HELP}");
    info!(%mode, "interactive timer started");

    let mut pump = tokio::time::interval(PUMP_PERIOD);
    pump.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = pump.tick() => {
                let events = timer.pump();
                persist_events(&db, &events)?;
                if events.iter().any(|e| matches!(e, Event::TimerCompleted { .. })) {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    debug!("stdin closed, timer keeps running");
                    stdin_open = false;
                    continue;
                };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(message) => {
                        timer.feedback_mut().notice(&message);
                        continue;
                    }
                };
                let events = match command {
                    Command::Start => timer.start(),
                    Command::Pause => timer.pause(),
                    Command::Resume => timer.resume(),
                    Command::Reset => timer.reset(),
                    Command::Mode(mode) => timer.select_mode(mode),
                    Command::Minutes(minutes) => timer.set_manual_duration(minutes),
                    Command::Quit => break,
                };
                persist_events(&db, &events)?;
            }
            _ = &mut ctrl_c => break,
        }
    }

    timer.feedback_mut().finish();
    Ok(())
}

/// Renders the timer on a single status line, with notices on stderr.
#[derive(Debug, Default)]
struct TerminalFeedback {
    time: String,
    sessions: String,
    ambient: bool,
}

impl TerminalFeedback {
    fn redraw(&self) {
        let ambient = if self.ambient { "  ♪ ambient" } else { "" };
        let mut out = std::io::stdout().lock();
        // Trailing spaces clear leftovers from a longer previous line.
        let _ = write!(out, "\r⏱ {}  {}{ambient}          ", self.time, self.sessions);
        let _ = out.flush();
    }

    fn notice(&mut self, message: &str) {
        eprintln!("\n{message}");
        self.redraw();
    }

    fn finish(&mut self) {
        println!();
    }
}

impl Feedback for TerminalFeedback {
    fn show_time(&mut self, text: &str) {
        self.time = text.to_string();
        self.redraw();
    }

    fn show_sessions(&mut self, summary: &str) {
        self.sessions = summary.to_string();
        self.redraw();
    }

    fn announce(&mut self, achievement: &Achievement) {
        self.notice(&achievement.message);
    }

    fn time_up(&mut self, message: &str) {
        self.notice(&format!("\x07{message}"));
    }

    fn set_ambient(&mut self, playing: bool) {
        self.ambient = playing;
        self.redraw();
    }
}
