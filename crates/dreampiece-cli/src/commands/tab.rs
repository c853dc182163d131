use clap::Subcommand;
use dreampiece_core::tabs::{self, TabView};
use dreampiece_core::Database;

#[derive(Subcommand)]
pub enum TabAction {
    /// Show the last opened tab
    Show,
    /// Open a tab
    Switch { tab: String },
}

fn print_view(view: &TabView) {
    let timer = if view.focus_timer_visible {
        "shown"
    } else {
        "hidden"
    };
    println!("Tab: {} (focus timer {timer})", view.tab);
}

pub fn run(action: TabAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TabAction::Show => match tabs::last_tab(&db)? {
            Some(view) => print_view(&view),
            None => println!("No tab opened yet"),
        },
        TabAction::Switch { tab } => print_view(&tabs::switch_tab(&db, &tab)?),
    }
    Ok(())
}
