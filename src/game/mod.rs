// Public API
pub use cards::{Card, CardError, Deck, DeckError, Play, PlayKind, Rank, Suit, DECK_SIZE};
pub use errors::{GameError, PlayRejection};
pub use exchange::{resolve_gift, KING_SLAVE_CARDS, QUEEN_COMMONER_CARDS};
pub use logic::{GameState, PlayOutcome, RoundPhase};
pub use positions::{assign_positions, Position};
pub use rules::{Override, Ruleset};

// Internal modules
pub mod cards;
mod errors;
pub mod exchange;
mod logic;
pub mod positions;
pub mod rules;
