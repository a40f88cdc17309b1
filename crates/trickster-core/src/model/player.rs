use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// What one seat knows: its own hand, cards other seats have revealed, and its
/// guess history with the outcome observed for each guess.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    hand: Hand,
    #[serde(default)]
    exposed_cards: BTreeMap<PlayerId, Vec<Card>>,
    #[serde(default)]
    guesses: Vec<Vec<Card>>,
    #[serde(default)]
    outcomes: Vec<f64>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_hand(id: PlayerId, hand: Hand) -> Self {
        Self {
            id,
            hand,
            ..Self::default()
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn exposed_cards(&self) -> &BTreeMap<PlayerId, Vec<Card>> {
        &self.exposed_cards
    }

    /// Appends to what `owner` has revealed so far.
    pub fn expose(&mut self, owner: PlayerId, cards: &[Card]) {
        self.exposed_cards
            .entry(owner)
            .or_default()
            .extend_from_slice(cards);
    }

    pub fn guesses(&self) -> &[Vec<Card>] {
        &self.guesses
    }

    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    pub fn record_guess(&mut self, cards: Vec<Card>) {
        self.guesses.push(cards);
    }

    pub fn record_outcome(&mut self, value: f64) {
        self.outcomes.push(value);
    }

    pub fn last_guess(&self) -> Option<&[Card]> {
        self.guesses.last().map(Vec::as_slice)
    }

    pub fn last_outcome(&self) -> Option<f64> {
        self.outcomes.last().copied()
    }
}
