use chrono::{Local, Utc};
use dreampiece_core::game::rng_from_seed;
use dreampiece_core::{Config, Dashboard, Database};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let dash = Dashboard::load(
        &db,
        &config,
        Utc::now(),
        Local::now().date_naive(),
        &mut rng_from_seed(None),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    println!("Current CGPA: {}   Target CGPA: {}", dash.current_cgpa, dash.target_cgpa);
    println!(
        "Habits: {} tracked, {} done today, streak {}",
        dash.habit_count, dash.habits.today_completed, dash.habits.current_streak
    );
    println!("Days until exam: {}", dash.days_until_exam);
    println!("Timer: {}   {}", dash.timer_display, dash.sessions_summary);
    println!("Game: {}", dash.score);
    println!("Theme: {} ({})", dash.theme, dash.theme_toggle_label);
    if let Some(tab) = &dash.last_tab {
        println!("Last tab: {}", tab.tab);
    }
    println!();
    println!("\"{}\"", dash.quote);
    Ok(())
}
