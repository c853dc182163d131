use dreampiece_core::game::rng_from_seed;
use dreampiece_core::quotes::daily_quote;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", daily_quote(&mut rng_from_seed(None)));
    Ok(())
}
