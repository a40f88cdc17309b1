use trickster_core::model::card::Card;
use trickster_core::model::player::PlayerId;
use std::collections::HashMap;
use tracing::{Level, event};

/// Score held by a card that has been played or exposed.
pub const PINNED: f64 = -1.0;

/// Per-card likelihood scores for one player's view of the deck.
///
/// Entries keep the order of the deck they were seeded from, so ties in
/// [`CardTracker::ranked`] resolve by deck position. A pinned card never
/// leaves [`PINNED`] until the tracker is reseeded.
#[derive(Debug, Clone, Default)]
pub struct CardTracker {
    entries: Vec<(Card, f64)>,
    /// `Card::index` to position in `entries`.
    slots: HashMap<usize, usize>,
}

impl CardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all state with `cards` at score zero.
    ///
    /// Calling this again wipes every pin, so callers only seed an empty tracker.
    pub fn initialize_totals<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.reset();
        for card in cards {
            if self.slots.contains_key(&card.index()) {
                continue;
            }
            self.slots.insert(card.index(), self.entries.len());
            self.entries.push((card, 0.0));
        }
        event!(
            target: "trickster_bot::tracker",
            Level::DEBUG,
            tracked = self.entries.len(),
            "tracker seeded"
        );
    }

    /// Pins every listed card that is tracked. Unknown cards are ignored.
    pub fn remove_card<'a, I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = &'a Card>,
    {
        for card in cards {
            if let Some(&slot) = self.slots.get(&card.index()) {
                self.entries[slot].1 = PINNED;
            }
        }
    }

    /// Pins everything any player has revealed.
    pub fn remove_seen<'a, I, C>(&mut self, exposed: I)
    where
        I: IntoIterator<Item = (&'a PlayerId, &'a C)>,
        C: AsRef<[Card]> + 'a,
    {
        for (_, cards) in exposed {
            self.remove_card(cards.as_ref());
        }
    }

    /// Spreads the latest outcome evenly over the latest guess.
    ///
    /// Every unpinned tracked card in `last_guess` is overwritten with
    /// `last_outcome / last_guess.len()`. Nothing happens until both a guess
    /// and its outcome exist. Empty guesses and outcomes that are negative or
    /// not finite are skipped.
    pub fn update_probabilities(&mut self, last_guess: Option<&[Card]>, last_outcome: Option<f64>) {
        let (Some(guess), Some(outcome)) = (last_guess, last_outcome) else {
            event!(
                target: "trickster_bot::tracker",
                Level::TRACE,
                "no guess feedback yet"
            );
            return;
        };
        if guess.is_empty() {
            event!(
                target: "trickster_bot::tracker",
                Level::DEBUG,
                outcome,
                "skipping feedback for empty guess"
            );
            return;
        }
        // A negative score would collide with PINNED.
        if !outcome.is_finite() || outcome < 0.0 {
            event!(
                target: "trickster_bot::tracker",
                Level::DEBUG,
                outcome,
                "skipping invalid outcome"
            );
            return;
        }

        let probability = outcome / guess.len() as f64;
        let mut updated = 0usize;
        for card in guess {
            let Some(&slot) = self.slots.get(&card.index()) else {
                continue;
            };
            let score = &mut self.entries[slot].1;
            if *score == PINNED {
                continue;
            }
            *score = probability;
            updated += 1;
        }
        event!(
            target: "trickster_bot::tracker",
            Level::DEBUG,
            probability,
            guess_size = guess.len(),
            updated,
            "guess feedback applied"
        );
    }

    pub fn score(&self, card: Card) -> Option<f64> {
        self.slots.get(&card.index()).map(|&slot| self.entries[slot].1)
    }

    pub fn is_pinned(&self, card: Card) -> bool {
        self.score(card) == Some(PINNED)
    }

    pub fn is_tracked(&self, card: Card) -> bool {
        self.slots.contains_key(&card.index())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn pinned_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, score)| *score == PINNED)
            .count()
    }

    /// Cards and scores in seeding order.
    pub fn iter(&self) -> impl Iterator<Item = (Card, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// All tracked cards, highest score first. Equal scores keep seeding order.
    pub fn ranked(&self) -> Vec<(Card, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{CardTracker, PINNED};
    use std::collections::{BTreeMap, HashMap};
    use trickster_core::model::card::Card;
    use trickster_core::model::deck::Deck;
    use trickster_core::model::player::PlayerId;
    use trickster_core::model::rank::Rank;
    use trickster_core::model::suit::Suit;

    fn small_deck() -> Vec<Card> {
        vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Three, Suit::Diamonds),
        ]
    }

    #[test]
    fn seeding_zeroes_every_card() {
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(Deck::standard().copy_cards());
        assert_eq!(tracker.len(), 52);
        assert_eq!(tracker.pinned_count(), 0);
        assert!(tracker.iter().all(|(_, score)| score == 0.0));
    }

    #[test]
    fn reseeding_clears_pins() {
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(small_deck());
        tracker.remove_card(&small_deck()[..2]);
        assert_eq!(tracker.pinned_count(), 2);
        tracker.initialize_totals(small_deck());
        assert_eq!(tracker.pinned_count(), 0);
    }

    #[test]
    fn removing_unknown_card_is_ignored() {
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(small_deck());
        let stranger = Card::new(Rank::Seven, Suit::Clubs);
        tracker.remove_card(&[stranger]);
        assert_eq!(tracker.pinned_count(), 0);
        assert!(!tracker.is_tracked(stranger));
        assert_eq!(tracker.score(stranger), None);
    }

    #[test]
    fn remove_then_remove_seen_pins_only_named_cards() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        tracker.remove_card(&[deck[0]]);

        let mut exposed = BTreeMap::new();
        exposed.insert(PlayerId(2), vec![deck[2]]);
        tracker.remove_seen(&exposed);

        assert_eq!(tracker.score(deck[0]), Some(PINNED));
        assert_eq!(tracker.score(deck[2]), Some(PINNED));
        assert_eq!(tracker.score(deck[1]), Some(0.0));
        assert_eq!(tracker.score(deck[3]), Some(0.0));
    }

    #[test]
    fn remove_seen_tolerates_overlap() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        let mut exposed: HashMap<PlayerId, Vec<Card>> = HashMap::new();
        exposed.insert(PlayerId(1), vec![deck[1], deck[3]]);
        exposed.insert(PlayerId(2), vec![deck[3]]);
        tracker.remove_seen(&exposed);
        assert_eq!(tracker.pinned_count(), 2);
    }

    #[test]
    fn feedback_spreads_outcome_over_guess() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        let guess = [deck[1], deck[2], deck[3], Card::new(Rank::Nine, Suit::Spades)];
        tracker.update_probabilities(Some(&guess), Some(2.0));
        assert_eq!(tracker.score(deck[1]), Some(0.5));
        assert_eq!(tracker.score(deck[2]), Some(0.5));
        assert_eq!(tracker.score(deck[3]), Some(0.5));
        assert_eq!(tracker.score(deck[0]), Some(0.0));
        assert_eq!(tracker.len(), 4);
    }

    #[test]
    fn pinned_cards_ignore_feedback() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        tracker.remove_card(&[deck[1]]);
        tracker.update_probabilities(Some(&deck[..2]), Some(2.0));
        assert_eq!(tracker.score(deck[1]), Some(PINNED));
        assert_eq!(tracker.score(deck[0]), Some(1.0));
        tracker.update_probabilities(Some(&deck[1..2]), Some(1.0));
        assert!(tracker.is_pinned(deck[1]));
    }

    #[test]
    fn missing_history_leaves_scores_untouched() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        tracker.update_probabilities(Some(&deck[..2]), Some(1.0));
        let before: Vec<_> = tracker.iter().collect();

        tracker.update_probabilities(None, Some(3.0));
        tracker.update_probabilities(Some(&deck[..]), None);
        tracker.update_probabilities(None, None);
        tracker.update_probabilities(Some(&[]), Some(1.0));

        let after: Vec<_> = tracker.iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn negative_or_nan_outcome_is_ignored() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());

        tracker.update_probabilities(Some(&deck[..2]), Some(-2.0));
        tracker.update_probabilities(Some(&deck[..2]), Some(f64::NAN));
        tracker.update_probabilities(Some(&deck[..2]), Some(f64::INFINITY));
        assert!(tracker.iter().all(|(_, score)| score == 0.0));
        assert_eq!(tracker.pinned_count(), 0);
        assert!(!tracker.is_pinned(deck[1]));

        tracker.update_probabilities(Some(&deck[..2]), Some(2.0));
        assert_eq!(tracker.score(deck[0]), Some(1.0));
        assert_eq!(tracker.score(deck[1]), Some(1.0));
    }

    #[test]
    fn latest_feedback_overwrites_earlier_rounds() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        tracker.update_probabilities(Some(&deck[..2]), Some(2.0));
        tracker.update_probabilities(Some(&deck[..2]), Some(0.0));
        assert_eq!(tracker.score(deck[0]), Some(0.0));
        assert_eq!(tracker.score(deck[1]), Some(0.0));
    }

    #[test]
    fn ranked_is_descending_with_stable_ties() {
        let deck = small_deck();
        let mut tracker = CardTracker::new();
        tracker.initialize_totals(deck.clone());
        tracker.remove_card(&[deck[0]]);
        tracker.update_probabilities(Some(&[deck[3]]), Some(1.0));
        let order: Vec<Card> = tracker.ranked().into_iter().map(|(card, _)| card).collect();
        assert_eq!(order, vec![deck[3], deck[1], deck[2], deck[0]]);
    }
}
