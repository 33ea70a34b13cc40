// A GameState owns one table: the hands, the trick in progress, the finish
// order of the current round and the positions earned in the last one.
// Callers drive it through `play_cards` and the round transition calls.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::game::cards::{Card, Deck, Play};
use crate::game::errors::{GameError, PlayRejection};
use crate::game::exchange::{self, KING_SLAVE_CARDS};
use crate::game::positions::{assign_positions, demoted_king, Position};
use crate::game::rules::Ruleset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundPhase {
    /// Cards dealt for the next round; waiting for the King and Queen to choose gifts.
    Exchange,
    AwaitingPlay,
    RoundOver,
}

/// What an accepted play led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The trick goes on with `next_player`.
    Continued { next_player: usize },
    /// Everyone still in has acted; `leader` opens the next trick.
    TrickEnded { leader: usize },
    /// All but one player has emptied their hand and positions are set.
    RoundOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    num_players: usize,
    ruleset: Ruleset,
    rng: StdRng,
    hands: Vec<Vec<Card>>,
    played: Vec<Card>,
    positions: Vec<Option<Position>>,
    finished_order: Vec<usize>,
    current_player: usize,
    trick_leader: usize,
    last_play: Option<Play>,
    trick_plays: Vec<Play>,
    round_number: u32,
    is_first_round: bool,
    phase: RoundPhase,
    pending_demotion: Option<usize>,
}

impl GameState {
    /// Build a table and deal round 0 from the configured seed.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut state = Self::empty(config);
        state.reset(config.seed)?;
        Ok(state)
    }

    fn empty(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            num_players: config.num_players,
            ruleset: config.ruleset.ruleset(),
            rng,
            hands: vec![Vec::new(); config.num_players],
            played: Vec::new(),
            positions: vec![None; config.num_players],
            finished_order: Vec::new(),
            current_player: 0,
            trick_leader: 0,
            last_play: None,
            trick_plays: Vec::new(),
            round_number: 0,
            is_first_round: true,
            phase: RoundPhase::AwaitingPlay,
            pending_demotion: None,
        }
    }

    /// Seat explicit hands, e.g. to resume a table or stage a scenario.
    ///
    /// The state starts in the first round with no positions, `starting_player`
    /// to act and an open trick. No card may be held twice and the starting
    /// player must hold cards.
    pub fn from_hands(
        config: &GameConfig,
        hands: Vec<Vec<Card>>,
        starting_player: usize,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if hands.len() != config.num_players {
            return Err(ConfigError::UnsupportedPlayerCount(hands.len()).into());
        }
        if hands.get(starting_player).map_or(true, Vec::is_empty) {
            return Err(GameError::InvalidStartingPlayer(starting_player));
        }

        let mut seen = HashSet::new();
        if let Some(card) = hands.iter().flatten().find(|card| !seen.insert(**card)) {
            return Err(GameError::DuplicateCard(*card));
        }

        let mut state = Self::empty(config);
        state.hands = hands;
        for hand in state.hands.iter_mut() {
            hand.sort();
        }
        state.current_player = starting_player;
        state.trick_leader = starting_player;
        Ok(state)
    }

    /// Positions carried over from an earlier round. Marks the state as past
    /// the first round.
    #[must_use]
    pub fn with_positions(mut self, positions: [Position; 4]) -> Self {
        self.positions = positions.iter().map(|p| Some(*p)).collect();
        self.is_first_round = false;
        self
    }

    #[must_use]
    pub fn with_round(mut self, round_number: u32) -> Self {
        self.round_number = round_number;
        self.is_first_round = round_number == 0;
        self
    }

    /// Open the current trick with `play` already on the table. Its cards
    /// join the played pile, so none of them may still be held.
    pub fn with_last_play(mut self, play: Play) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        if let Some(card) = play.cards().iter().find(|card| {
            !seen.insert(**card)
                || self.played.contains(card)
                || self.hands.iter().any(|hand| hand.contains(card))
        }) {
            return Err(GameError::CardAlreadyPlayed(*card));
        }

        self.played.extend_from_slice(play.cards());
        self.trick_plays.push(play.clone());
        self.last_play = Some(play);
        Ok(self)
    }

    /// Deal a fresh round 0. The holder of the ruleset's opening card leads.
    ///
    /// A seed makes this deal and every later re-deal reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(), GameError> {
        self.rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        self.deal()?;
        self.positions = vec![None; self.num_players];
        self.round_number = 0;
        self.is_first_round = true;
        self.begin_round();

        let opener = self.opening_card_holder();
        self.current_player = opener;
        self.trick_leader = opener;

        info!(
            ruleset = self.ruleset.name,
            opener,
            seeded = seed.is_some(),
            "Dealt opening round"
        );
        Ok(())
    }

    fn deal(&mut self) -> Result<(), GameError> {
        let mut deck = Deck::new();
        deck.shuffle_with(&mut self.rng);
        self.hands = deck.deal(self.num_players)?;
        self.played.clear();
        Ok(())
    }

    fn begin_round(&mut self) {
        self.finished_order.clear();
        self.trick_plays.clear();
        self.last_play = None;
        self.pending_demotion = None;
        self.phase = RoundPhase::AwaitingPlay;
    }

    fn opening_card_holder(&self) -> usize {
        self.hands
            .iter()
            .position(|hand| self.ruleset.holds_opening_card(hand))
            .unwrap_or(0)
    }

    /// Re-deal, exchange by position and hand the lead to the Slave.
    pub fn start_new_round(
        &mut self,
        king_gives: Option<[Card; KING_SLAVE_CARDS]>,
        queen_gives: Option<Card>,
    ) -> Result<(), GameError> {
        self.deal_next_round()?;
        self.complete_exchange(king_gives, queen_gives);
        Ok(())
    }

    /// First half of a round transition: deal new hands but hold off the
    /// exchange so the King and Queen can inspect what they will receive.
    pub fn deal_next_round(&mut self) -> Result<(), GameError> {
        self.deal()?;
        self.is_first_round = false;
        self.trick_plays.clear();
        self.last_play = None;
        self.phase = RoundPhase::Exchange;
        debug!(round = self.round_number + 1, "Dealt next round, awaiting exchange");
        Ok(())
    }

    /// Second half of a round transition: exchange and open play.
    ///
    /// Without recorded positions no exchange happens and the opening-card
    /// holder leads instead of the Slave.
    pub fn complete_exchange(
        &mut self,
        king_gives: Option<[Card; KING_SLAVE_CARDS]>,
        queen_gives: Option<Card>,
    ) {
        if self.phase != RoundPhase::Exchange {
            debug!(phase = ?self.phase, "No exchange pending");
            return;
        }

        exchange::exchange_cards(
            &mut self.hands,
            &self.positions,
            king_gives.as_ref().map(|cards| cards.as_slice()),
            queen_gives,
        );

        self.round_number += 1;
        self.begin_round();

        let leader = self
            .holder_of(Position::Slave)
            .unwrap_or_else(|| self.opening_card_holder());
        self.current_player = leader;
        self.trick_leader = leader;

        info!(round = self.round_number, leader, "Round started");
    }

    /// Apply a play for `player`. Returns whether it was accepted; rejected
    /// plays leave the state untouched.
    pub fn play_cards(&mut self, player: usize, cards: &[Card]) -> bool {
        match self.try_play_cards(player, cards) {
            Ok(_) => true,
            Err(rejection) => {
                debug!(player, %rejection, "Play rejected");
                false
            }
        }
    }

    pub fn try_play_cards(
        &mut self,
        player: usize,
        cards: &[Card],
    ) -> Result<PlayOutcome, PlayRejection> {
        match self.phase {
            RoundPhase::RoundOver => return Err(PlayRejection::GameAlreadyOver),
            RoundPhase::Exchange => return Err(PlayRejection::ExchangePending),
            RoundPhase::AwaitingPlay => {}
        }

        if player != self.current_player {
            return Err(PlayRejection::NotCurrentPlayer {
                player,
                current: self.current_player,
            });
        }

        let hand = &self.hands[player];
        if let Some(missing) = cards.iter().find(|card| !hand.contains(card)) {
            return Err(PlayRejection::CardsNotOwned(*missing));
        }
        let play = Play::new(player, cards);
        if !self.ruleset.admits(&play) {
            return Err(PlayRejection::StructurallyInvalidCombination);
        }
        if !self.ruleset.can_beat(&play, self.last_play.as_ref()) {
            return Err(PlayRejection::DoesNotBeatLastPlay);
        }

        debug!(%play, "Play accepted");

        if !play.is_pass() {
            self.hands[player].retain(|card| !cards.contains(card));
            self.played.extend_from_slice(play.cards());
            self.last_play = Some(play.clone());

            if self.hands[player].is_empty() {
                self.finish_player(player);

                if self.finished_order.len() + 1 >= self.num_players {
                    self.end_round();
                    return Ok(PlayOutcome::RoundOver);
                }
            }
        }

        self.trick_plays.push(play);

        if self.trick_plays.len() >= self.active_players() {
            let leader = self.end_trick();
            Ok(PlayOutcome::TrickEnded { leader })
        } else {
            self.advance_turn();
            Ok(PlayOutcome::Continued {
                next_player: self.current_player,
            })
        }
    }

    fn finish_player(&mut self, player: usize) {
        self.finished_order.push(player);
        info!(player, place = self.finished_order.len(), "Player finished");

        if self.finished_order.len() == 1 {
            self.pending_demotion =
                demoted_king(player, self.holder_of(Position::King), self.is_first_round);
            if let Some(king) = self.pending_demotion {
                info!(king, first = player, "Reigning King beaten to first place");
            }
        }
    }

    fn active_players(&self) -> usize {
        self.num_players - self.finished_order.len()
    }

    fn advance_turn(&mut self) {
        let mut next = (self.current_player + 1) % self.num_players;
        while self.finished_order.contains(&next) {
            next = (next + 1) % self.num_players;
        }
        self.current_player = next;
    }

    fn end_trick(&mut self) -> usize {
        let winner = self.ruleset.trick_winner(&self.trick_plays);
        self.trick_plays.clear();
        self.last_play = None;

        match winner {
            Some(winner) if !self.finished_order.contains(&winner) => {
                self.current_player = winner;
            }
            _ => self.advance_turn(),
        }
        self.trick_leader = self.current_player;

        debug!(?winner, leader = self.trick_leader, "Trick ended");
        self.trick_leader
    }

    fn end_round(&mut self) {
        if let Some(last) = (0..self.num_players).find(|p| !self.finished_order.contains(p)) {
            self.finished_order.push(last);
        }

        self.positions = assign_positions(
            &self.finished_order,
            self.holder_of(Position::King),
            self.is_first_round,
        );
        self.trick_plays.clear();
        self.phase = RoundPhase::RoundOver;

        info!(
            round = self.round_number,
            finished_order = ?self.finished_order,
            positions = ?self.positions,
            "Round over"
        );
    }

    fn holder_of(&self, position: Position) -> Option<usize> {
        self.positions.iter().position(|p| *p == Some(position))
    }

    /// Legal plays for `player`; empty unless it is their turn in live play.
    pub fn get_valid_plays(&self, player: usize) -> Vec<Vec<Card>> {
        if self.phase != RoundPhase::AwaitingPlay || player != self.current_player {
            return Vec::new();
        }
        self.ruleset.valid_plays(&self.hands[player], self.last_play.as_ref())
    }

    /// Copy of a player's hand, empty for unknown players.
    pub fn get_hand(&self, player: usize) -> Vec<Card> {
        self.hands.get(player).cloned().unwrap_or_default()
    }

    pub fn get_position(&self, player: usize) -> Option<Position> {
        self.positions.get(player).copied().flatten()
    }

    pub fn positions(&self) -> &[Option<Position>] {
        &self.positions
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn trick_leader(&self) -> usize {
        self.trick_leader
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn is_first_round(&self) -> bool {
        self.is_first_round
    }

    pub fn last_play(&self) -> Option<&Play> {
        self.last_play.as_ref()
    }

    pub fn trick_plays(&self) -> &[Play] {
        &self.trick_plays
    }

    pub fn finished_order(&self) -> &[usize] {
        &self.finished_order
    }

    /// Cards played since the last deal.
    pub fn played_cards(&self) -> &[Card] {
        &self.played
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// The reigning King, once the round's first finisher has beaten them.
    pub fn pending_demotion(&self) -> Option<usize> {
        self.pending_demotion
    }

    /// The two cards the Slave currently owes the King.
    pub fn get_cards_to_receive_from_slave(&self) -> Option<Vec<Card>> {
        let slave = self.holder_of(Position::Slave)?;
        let hand = self.hands.get(slave)?;
        (hand.len() >= KING_SLAVE_CARDS).then(|| exchange::tribute(hand, KING_SLAVE_CARDS))
    }

    /// The card the Commoner currently owes the Queen.
    pub fn get_cards_to_receive_from_commoner(&self) -> Option<Card> {
        let commoner = self.holder_of(Position::Commoner)?;
        let hand = self.hands.get(commoner)?;
        exchange::tribute(hand, 1).first().copied()
    }
}
