use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use slave::{Card, GameConfig, GameState, Play, PlayOutcome, Position, RulesetPreset};

// ============================================================================
// Card Creation Macro
// ============================================================================

#[macro_export]
macro_rules! cards {
    ($($rank:ident $suit:ident),* $(,)?) => {
        vec![$(slave::Card::new(slave::Rank::$rank, slave::Suit::$suit)),*]
    };
}

/// Parse short notation such as `"3D TS AH"`.
pub fn parse_cards(s: &str) -> Vec<Card> {
    s.split_whitespace()
        .map(|c| Card::from_string(c).unwrap())
        .collect()
}

// ============================================================================
// Game Setup Utilities
// ============================================================================

pub struct GameBuilder {
    config: GameConfig,
    hands: Vec<Vec<Card>>,
    starting_player: usize,
    positions: Option<[Position; 4]>,
    round: Option<u32>,
    last_play: Option<Play>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            hands: vec![Vec::new(); 4],
            starting_player: 0,
            positions: None,
            round: None,
            last_play: None,
        }
    }

    pub fn with_ruleset(mut self, ruleset: RulesetPreset) -> Self {
        self.config = self.config.with_ruleset(ruleset);
        self
    }

    pub fn with_hand(mut self, player: usize, cards: Vec<Card>) -> Self {
        self.hands[player] = cards;
        self
    }

    pub fn with_hands(mut self, hands: [&str; 4]) -> Self {
        self.hands = hands.iter().map(|h| parse_cards(h)).collect();
        self
    }

    pub fn starting_with(mut self, player: usize) -> Self {
        self.starting_player = player;
        self
    }

    pub fn with_positions(mut self, positions: [Position; 4]) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn in_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_last_play(mut self, player: usize, cards: &str) -> Self {
        self.last_play = Some(Play::new(player, &parse_cards(cards)));
        self
    }

    pub fn build(self) -> GameState {
        let mut game =
            GameState::from_hands(&self.config, self.hands, self.starting_player).unwrap();
        if let Some(round) = self.round {
            game = game.with_round(round);
        }
        if let Some(positions) = self.positions {
            game = game.with_positions(positions);
        }
        if let Some(play) = self.last_play {
            game = game.with_last_play(play).unwrap();
        }
        game
    }
}

// ============================================================================
// Round Drivers
// ============================================================================

/// Play the current round to completion with uniformly random legal plays,
/// checking that every enumerated play is accepted. Returns the number of
/// plays made.
pub fn play_out_round(game: &mut GameState, seed: u64) -> usize {
    const STEP_BUDGET: usize = 2_000;

    let mut rng = StdRng::seed_from_u64(seed);
    for step in 0..STEP_BUDGET {
        let player = game.current_player();
        let plays = game.get_valid_plays(player);
        assert!(!plays.is_empty(), "no legal plays for player {player}");

        let choice = plays.choose(&mut rng).unwrap().clone();
        match game.try_play_cards(player, &choice) {
            Ok(PlayOutcome::RoundOver) => return step + 1,
            Ok(_) => {}
            Err(rejection) => panic!("enumerated play {choice:?} rejected: {rejection}"),
        }
    }
    panic!("round did not finish within {STEP_BUDGET} plays");
}
