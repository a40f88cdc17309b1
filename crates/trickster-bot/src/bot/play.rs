use trickster_core::model::card::Card;
use trickster_core::model::deck::Deck;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Index of the highest-ranked card, ranked by position in `deck.values()`.
    ///
    /// Suit never breaks a tie; the leftmost card of the top rank wins.
    pub fn choose(hand: &[Card], deck: &Deck) -> Option<usize> {
        if hand.is_empty() {
            return None;
        }

        let mut best_index = 0;
        let mut best_value: Option<usize> = None;
        for (index, card) in hand.iter().enumerate() {
            let Some(value) = deck.value_index(card.rank) else {
                continue;
            };
            if best_value.is_none_or(|best| value > best) {
                best_value = Some(value);
                best_index = index;
            }
        }
        Some(best_index)
    }
}
