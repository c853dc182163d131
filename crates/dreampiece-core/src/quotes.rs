use rand::seq::SliceRandom;
use rand::Rng;

pub const QUOTES: [&str; 3] = [
    "“If you don’t take risks, you can’t create a future.” — Monkey D. Luffy 🏴‍☠️",
    "“When you give up, your dreams and everything else—they're gone.” — Luffy 🌊",
    "“It’s not about being better than someone else, it’s about being better than you were yesterday.” — Goku 💫",
];

/// Pick one quote uniformly at random.
pub fn daily_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}
