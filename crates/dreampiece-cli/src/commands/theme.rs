use clap::Subcommand;
use dreampiece_core::theme;
use dreampiece_core::Database;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the active theme
    Show,
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let theme = match action {
        ThemeAction::Show => theme::load_theme(&db)?,
        ThemeAction::Toggle => theme::toggle_theme(&db)?,
    };
    println!("{theme}");
    println!("{}", theme.toggle_label());
    Ok(())
}
