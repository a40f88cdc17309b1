use crate::model::card::Card;
use crate::model::rank::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards, positioned by [`Card::index`].
    pub fn standard() -> Self {
        let cards = (0..52).filter_map(Card::from_index).collect();
        Self { cards }
    }

    /// Builds a deck from an arbitrary card list. Later duplicates are dropped.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut seen = HashSet::new();
        let cards = cards.into_iter().filter(|card| seen.insert(*card)).collect();
        Self { cards }
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Self::standard();
        deck.cards.shuffle(&mut rng);
        deck
    }

    /// Canonical rank ordering, lowest first.
    pub fn values(&self) -> &'static [Rank] {
        &Rank::ORDERED
    }

    /// Position of `rank` within [`Deck::values`].
    pub fn value_index(&self, rank: Rank) -> Option<usize> {
        self.values().iter().position(|&value| value == rank)
    }

    /// Distinct cards of the deck in enumeration order.
    pub fn copy_cards(&self) -> Vec<Card> {
        self.cards.clone()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
