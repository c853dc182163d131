//! Rock-paper-scissors against the computer.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ValidationError};
use crate::storage::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Map a uniform roll in `[0, 1)` to a move, in thirds.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 1.0 / 3.0 {
            Move::Rock
        } else if roll < 2.0 / 3.0 {
            Move::Paper
        } else {
            Move::Scissors
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen::<f64>())
    }

    fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            other => Err(ValidationError::InvalidValue {
                field: "move".into(),
                message: format!("expected rock, paper or scissors, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Win => "You win.",
            Outcome::Lose => "You lose.",
            Outcome::Tie => "Tie.",
        }
    }
}

/// Outcome from the player's side.
pub fn judge(player: Move, computer: Move) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Score {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins = self.wins.saturating_add(1),
            Outcome::Lose => self.losses = self.losses.saturating_add(1),
            Outcome::Tie => self.ties = self.ties.saturating_add(1),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Wins: {}, Losses: {}, Ties: {}",
            self.wins, self.losses, self.ties
        )
    }

    /// Stored score; malformed JSON resets to zero and is overwritten.
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self> {
        let Some(raw) = store.get(keys::SCORE)? else {
            return Ok(Self::default());
        };
        match serde_json::from_str(&raw) {
            Ok(score) => Ok(score),
            Err(e) => {
                warn!("stored score unreadable, starting from zero: {e}");
                let score = Self::default();
                score.save(store)?;
                Ok(score)
            }
        }
    }

    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &K) -> Result<()> {
        store.set(keys::SCORE, &serde_json::to_string(self)?)
    }

    /// Zero the score and drop it from the store.
    pub fn reset<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self> {
        store.remove(keys::SCORE)?;
        Ok(Self::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player: Move,
    pub computer: Move,
    pub outcome: Outcome,
    pub score: Score,
}

/// Play one round, update the stored score, and report the result.
pub fn play<K, R>(store: &K, player: Move, rng: &mut R) -> Result<Round>
where
    K: KeyValueStore + ?Sized,
    R: Rng + ?Sized,
{
    let computer = Move::random(rng);
    let outcome = judge(player, computer);
    let mut score = Score::load(store)?;
    score.record(outcome);
    score.save(store)?;
    Ok(Round {
        player,
        computer,
        outcome,
        score,
    })
}

/// Seeded generator for reproducible rounds, or entropy-seeded when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}
