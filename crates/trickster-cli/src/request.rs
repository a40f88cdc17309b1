use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{Level, event};
use trickster_bot::{PlayingStrategy, StrategyError};
use trickster_core::model::card::Card;
use trickster_core::model::deck::Deck;
use trickster_core::model::hand::Hand;
use trickster_core::model::player::{Player, PlayerId};

/// One seat's view of the table, as read from a JSON request file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DecisionRequest {
    #[serde(default)]
    pub player: PlayerId,
    pub hand: Vec<Card>,
    #[serde(default)]
    pub exposed: BTreeMap<PlayerId, Vec<Card>>,
    #[serde(default)]
    pub guesses: Vec<Vec<Card>>,
    #[serde(default)]
    pub outcomes: Vec<f64>,
    pub round: usize,
    /// Defaults to the standard 52-card deck.
    #[serde(default)]
    pub deck: Option<Vec<Card>>,
    /// Cards a first-round guess may sample from; defaults to the deck.
    #[serde(default)]
    pub candidates: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DecisionResponse {
    pub play_index: Option<usize>,
    pub play_card: Option<Card>,
    pub guess: Vec<Card>,
}

impl DecisionRequest {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RequestError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| RequestError::Parse {
            source,
            path: path.to_path_buf(),
        })
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        // An outcome can only follow its guess.
        if self.outcomes.len() > self.guesses.len() {
            return Err(RequestError::MisalignedHistory {
                guesses: self.guesses.len(),
                outcomes: self.outcomes.len(),
            });
        }
        if let Some((index, &value)) = self
            .outcomes
            .iter()
            .enumerate()
            .find(|(_, outcome)| !outcome.is_finite() || **outcome < 0.0)
        {
            return Err(RequestError::InvalidOutcome { index, value });
        }
        if let Some(deck) = &self.deck {
            if deck.is_empty() {
                return Err(RequestError::EmptyDeck);
            }
        }
        Ok(())
    }

    pub fn deck(&self) -> Deck {
        match &self.deck {
            Some(cards) => Deck::from_cards(cards.iter().copied()),
            None => Deck::standard(),
        }
    }

    pub fn to_player(&self) -> Player {
        let mut player = Player::with_hand(self.player, Hand::with_cards(self.hand.clone()));
        for (owner, cards) in &self.exposed {
            player.expose(*owner, cards);
        }
        for guess in &self.guesses {
            player.record_guess(guess.clone());
        }
        for outcome in &self.outcomes {
            player.record_outcome(*outcome);
        }
        player
    }

    /// Plays first so the guess sees everything the play step tracked.
    pub fn decide(&self, strategy: &mut PlayingStrategy) -> Result<DecisionResponse, RequestError> {
        self.validate()?;
        let deck = self.deck();
        let player = self.to_player();

        let play_index = strategy.play(&player, &deck);
        let play_card = play_index.and_then(|index| player.hand().get(index));

        let candidates = self.candidates.as_deref().unwrap_or(deck.cards());
        let guess = strategy.guess(candidates, self.round)?;

        event!(
            target: "trickster_cli::decide",
            Level::DEBUG,
            player = %self.player,
            round = self.round,
            play_index = ?play_index,
            guess_size = guess.len(),
        );

        Ok(DecisionResponse {
            play_index,
            play_card,
            guess,
        })
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read request {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse request {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("{outcomes} outcomes recorded for only {guesses} guesses")]
    MisalignedHistory { guesses: usize, outcomes: usize },
    #[error("outcome {value} at position {index} must be a finite, non-negative number")]
    InvalidOutcome { index: usize, value: f64 },
    #[error("request deck must not be empty")]
    EmptyDeck,
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}
