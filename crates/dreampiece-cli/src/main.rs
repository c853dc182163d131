use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dreampiece", version, about = "DreamPiece productivity widget")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Daily habit checklist
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Current and target CGPA
    Cgpa {
        #[command(subcommand)]
        action: commands::cgpa::CgpaAction,
    },
    /// Exam countdown
    Exam {
        #[command(subcommand)]
        action: commands::exam::ExamAction,
    },
    /// Light/dark theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Print a motivational quote
    Quote,
    /// Rock-paper-scissors
    Game {
        #[command(subcommand)]
        action: commands::game::GameAction,
    },
    /// Remember the open tab
    Tab {
        #[command(subcommand)]
        action: commands::tab::TabAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Everything shown on startup
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Cgpa { action } => commands::cgpa::run(action),
        Commands::Exam { action } => commands::exam::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Quote => commands::quote::run(),
        Commands::Game { action } => commands::game::run(action),
        Commands::Tab { action } => commands::tab::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Dashboard { json } => commands::dashboard::run(json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
