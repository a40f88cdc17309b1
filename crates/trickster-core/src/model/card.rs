use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Stable identifier in `0..52`: suit offset plus rank position.
    pub const fn index(self) -> usize {
        self.suit.offset() + self.rank.index()
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        let suit = Suit::from_index(index / 13)?;
        let rank = Rank::from_value((index % 13) as u8 + 2)?;
        Some(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
