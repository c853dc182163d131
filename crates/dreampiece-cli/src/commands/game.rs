use clap::Subcommand;
use dreampiece_core::game::{self, rng_from_seed};
use dreampiece_core::{Database, Move, Score};

#[derive(Subcommand)]
pub enum GameAction {
    /// Play one round
    Play {
        /// rock, paper or scissors
        player: Move,
        /// Seed the computer's choice for a reproducible round
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Show the running score
    Score,
    /// Zero the score
    Reset,
}

pub fn run(action: GameAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        GameAction::Play { player, seed, json } => {
            let round = game::play(&db, player, &mut rng_from_seed(seed))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&round)?);
            } else {
                println!("Computer chose {}. {}", round.computer, round.outcome.message());
                println!("{}", round.score.summary());
            }
        }
        GameAction::Score => println!("{}", Score::load(&db)?.summary()),
        GameAction::Reset => println!("{}", Score::reset(&db)?.summary()),
    }
    Ok(())
}
