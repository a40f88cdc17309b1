use super::{CardTracker, HAND_SIZE};
use crate::error::StrategyError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use trickster_core::model::card::Card;

/// Number of cards to commit to in `round`: `HAND_SIZE - round`.
pub fn guess_size(round: usize) -> Result<usize, StrategyError> {
    HAND_SIZE
        .checked_sub(round)
        .ok_or(StrategyError::RoundOutOfRange {
            round,
            max: HAND_SIZE,
        })
}

pub struct GuessPlanner;

impl GuessPlanner {
    /// Highest-scoring tracked cards, best first.
    ///
    /// Pinned cards sort last but are still tracked, so when fewer than `count`
    /// unpinned cards remain the tail is filled with played, exposed or held
    /// cards, the player's own hand included.
    pub fn informed(tracker: &CardTracker, count: usize) -> Result<Vec<Card>, StrategyError> {
        if count > tracker.len() {
            return Err(StrategyError::NotEnoughCards {
                requested: count,
                available: tracker.len(),
            });
        }
        Ok(tracker
            .ranked()
            .into_iter()
            .take(count)
            .map(|(card, _)| card)
            .collect())
    }

    /// Uniform sample of `count` distinct candidates, without replacement.
    pub fn sample<R: Rng + ?Sized>(
        candidates: &[Card],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, StrategyError> {
        let mut seen = HashSet::with_capacity(candidates.len());
        let pool: Vec<Card> = candidates
            .iter()
            .copied()
            .filter(|card| seen.insert(*card))
            .collect();
        if count > pool.len() {
            return Err(StrategyError::NotEnoughCards {
                requested: count,
                available: pool.len(),
            });
        }
        Ok(pool.choose_multiple(rng, count).copied().collect())
    }
}
