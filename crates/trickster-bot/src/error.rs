use thiserror::Error;

/// Rejections raised when a guess cannot be sized or filled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("round {round} is past the last round ({max})")]
    RoundOutOfRange { round: usize, max: usize },
    #[error("guess needs {requested} cards but only {available} are available")]
    NotEnoughCards { requested: usize, available: usize },
}
