pub mod game_builders;
pub mod logging;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use game_builders::{parse_cards, play_out_round, GameBuilder};
#[allow(unused_imports)]
pub use logging::init_logging;
