use thiserror::Error;

use super::cards::{Card, DeckError};
use crate::config::ConfigError;

/// Why a play was turned down. Rejections are routine game events and never
/// mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("Player {player} acted out of turn (current player is {current})")]
    NotCurrentPlayer { player: usize, current: usize },
    #[error("Player does not own card: {0}")]
    CardsNotOwned(Card),
    #[error("Cards do not form an admitted combination")]
    StructurallyInvalidCombination,
    #[error("Play does not beat the last play")]
    DoesNotBeatLastPlay,
    #[error("Round is already over")]
    GameAlreadyOver,
    #[error("Cards are being exchanged; play has not started")]
    ExchangePending,
}

/// Configuration, dealing and table set-up failures. These indicate a broken
/// setup rather than a game event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Card {0} is held more than once")]
    DuplicateCard(Card),
    #[error("Card {0} is still held or was already played")]
    CardAlreadyPlayed(Card),
    #[error("Player {0} cannot start: unknown seat or empty hand")]
    InvalidStartingPlayer(usize),
}
