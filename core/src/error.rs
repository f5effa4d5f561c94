use thiserror::Error;

use crate::{CardId, PairId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card id {0} appears more than once")]
    DuplicateCardId(CardId),
    #[error("Pair {0} must have exactly two cards, found {1}")]
    UnpairedCard(PairId, usize),
    #[error("Deck exceeds the maximum pair count")]
    TooManyPairs,
    #[error("Best score storage failed: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
