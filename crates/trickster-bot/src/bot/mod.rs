mod guess;
mod play;
mod tracker;

pub use guess::{GuessPlanner, guess_size};
pub use play::PlayPlanner;
pub use tracker::{CardTracker, PINNED};

use serde::{Deserialize, Serialize};

/// Cards dealt per hand; round `r` guesses `HAND_SIZE - r` cards.
pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Random guesses and highest-card play, no card tracking.
    Baseline,
    /// Tracks seen cards and guess feedback to rank guesses.
    #[default]
    Tracking,
}

impl StrategyKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "baseline" | "default" | "random" => Some(StrategyKind::Baseline),
            "tracking" | "tracked" | "informed" => Some(StrategyKind::Tracking),
            _ => None,
        }
    }

    pub const fn tracks_cards(self) -> bool {
        matches!(self, StrategyKind::Tracking)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyFeatures {
    kind: StrategyKind,
    seed: Option<u64>,
}

impl StrategyFeatures {
    pub const fn new(kind: StrategyKind, seed: Option<u64>) -> Self {
        Self { kind, seed }
    }

    /// Reads `TRICKSTER_STRATEGY` and `TRICKSTER_SEED`.
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn kind(self) -> StrategyKind {
        self.kind
    }

    pub const fn seed(self) -> Option<u64> {
        self.seed
    }

    pub fn with_kind(mut self, kind: StrategyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let kind = read("TRICKSTER_STRATEGY")
            .and_then(|raw| StrategyKind::from_label(&raw))
            .unwrap_or_default();

        let seed = read("TRICKSTER_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());

        Self { kind, seed }
    }
}
