use crate::bot::{
    CardTracker, GuessPlanner, PlayPlanner, StrategyFeatures, StrategyKind, guess_size,
};
use crate::error::StrategyError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};
use trickster_core::model::card::Card;
use trickster_core::model::deck::Deck;
use trickster_core::model::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyState {
    Uninitialized,
    Tracking,
}

/// Guessing and playing policy for one player over one game.
///
/// The tracker belongs to this instance alone. Reusing an instance for a new
/// game requires [`PlayingStrategy::reset`].
#[derive(Debug, Clone)]
pub struct PlayingStrategy {
    kind: StrategyKind,
    tracker: CardTracker,
    rng: StdRng,
}

impl PlayingStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            tracker: CardTracker::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(kind: StrategyKind, seed: u64) -> Self {
        Self {
            kind,
            tracker: CardTracker::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_features(features: StrategyFeatures) -> Self {
        match features.seed() {
            Some(seed) => Self::with_seed(features.kind(), seed),
            None => Self::new(features.kind()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn tracker(&self) -> &CardTracker {
        &self.tracker
    }

    pub fn state(&self) -> StrategyState {
        if self.tracker.is_empty() {
            StrategyState::Uninitialized
        } else {
            StrategyState::Tracking
        }
    }

    /// Seeds the tracker from `deck` unless it is already seeded.
    pub fn initialize(&mut self, deck: &Deck) {
        if self.tracker.is_empty() {
            self.tracker.initialize_totals(deck.copy_cards());
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Picks `13 - round` cards to commit to.
    ///
    /// With a seeded tracker the best-scoring cards are returned in score
    /// order; otherwise a uniform sample of `candidates` is drawn.
    pub fn guess(&mut self, candidates: &[Card], round: usize) -> Result<Vec<Card>, StrategyError> {
        let count = guess_size(round)?;
        let informed = self.kind.tracks_cards() && !self.tracker.is_empty();
        let selection = if informed {
            GuessPlanner::informed(&self.tracker, count)?
        } else {
            GuessPlanner::sample(candidates, count, &mut self.rng)?
        };
        log_guess_decision(self.kind, round, informed, candidates.len(), &selection);
        Ok(selection)
    }

    /// Index into the player's hand of the card to play, or `None` for an
    /// empty hand.
    pub fn play(&mut self, player: &Player, deck: &Deck) -> Option<usize> {
        let hand = player.hand();
        if hand.is_empty() {
            return None;
        }

        if self.kind.tracks_cards() {
            self.observe(player, deck);
        }

        let index = PlayPlanner::choose(hand.cards(), deck)?;
        log_play_decision(self.kind, player, index, self.tracker.pinned_count());
        Some(index)
    }

    // Pins must land before feedback so pinned cards stay out of the overwrite.
    fn observe(&mut self, player: &Player, deck: &Deck) {
        self.initialize(deck);
        self.tracker.remove_card(player.hand().iter());
        self.tracker.remove_seen(player.exposed_cards());
        self.tracker
            .update_probabilities(player.last_guess(), player.last_outcome());
    }
}

impl Default for PlayingStrategy {
    fn default() -> Self {
        Self::from_features(StrategyFeatures::from_env())
    }
}

fn log_guess_decision(
    kind: StrategyKind,
    round: usize,
    informed: bool,
    candidate_count: usize,
    selection: &[Card],
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let picked = if selection.len() <= 6 {
        selection
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} cards", selection.len())
    };

    let policy = if informed { "informed" } else { "sample" };
    event!(
        target: "trickster_bot::guess",
        Level::INFO,
        kind = ?kind,
        round,
        policy,
        candidates = candidate_count,
        picked = %picked,
    );
}

fn log_play_decision(kind: StrategyKind, player: &Player, index: usize, pinned: usize) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let chosen = player
        .hand()
        .get(index)
        .map(|card| card.to_string())
        .unwrap_or_default();

    event!(
        target: "trickster_bot::play",
        Level::INFO,
        kind = ?kind,
        player = %player.id(),
        hand_size = player.hand().len(),
        index,
        chosen = %chosen,
        pinned,
    );
}
