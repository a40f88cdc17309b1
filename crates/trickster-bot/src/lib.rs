pub mod bot;
pub mod error;
pub mod strategy;

pub use bot::{
    CardTracker, GuessPlanner, HAND_SIZE, PINNED, PlayPlanner, StrategyFeatures, StrategyKind,
};
pub use error::StrategyError;
pub use strategy::{PlayingStrategy, StrategyState};
