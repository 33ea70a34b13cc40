pub mod basic;
pub mod deck;
pub mod plays;

pub use basic::{Card, CardError, Rank, Suit, DECK_SIZE};
pub use deck::{Deck, DeckError};
pub use plays::{Play, PlayKind};
