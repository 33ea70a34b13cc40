// Library crate for the Slave card game rules engine.
// Adapters and agents drive a `GameState` through legal-play enumeration,
// `play_cards` and the round transition calls.

pub mod config;
pub mod game;

// Re-export commonly used types for easier access in tests and adapters
pub use config::{ConfigError, GameConfig, RulesetPreset};
pub use game::{
    Card, GameError, GameState, Play, PlayKind, PlayOutcome, PlayRejection, Position, Rank,
    RoundPhase, Ruleset, Suit,
};
