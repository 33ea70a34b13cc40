use std::fmt;

use super::basic::{Card, Rank};

/// Structural shape of a set of cards.
///
/// `Triple` only exists for the three-of-a-kind ruleset; whether a kind is
/// admitted at all is decided by [`crate::game::Ruleset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PlayKind {
    Pass,
    Single,
    Pair,
    Triple,
    Straight,
    FourOfKind,
}

impl PlayKind {
    /// Classify sorted cards, or `None` when they form no recognised shape.
    ///
    /// Equal-rank checks run before the straight check, so four cards of one
    /// rank are always a `FourOfKind`. A repeated card is never a shape.
    pub fn classify(sorted: &[Card]) -> Option<Self> {
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return None;
        }

        let same_rank = sorted.windows(2).all(|w| w[0].rank == w[1].rank);

        match sorted.len() {
            0 => Some(PlayKind::Pass),
            1 => Some(PlayKind::Single),
            2 if same_rank => Some(PlayKind::Pair),
            3 if same_rank => Some(PlayKind::Triple),
            4 if same_rank => Some(PlayKind::FourOfKind),
            n if n >= 3 && is_straight(sorted) => Some(PlayKind::Straight),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayKind::Pass => "Pass",
            PlayKind::Single => "Single",
            PlayKind::Pair => "Pair",
            PlayKind::Triple => "Triple",
            PlayKind::Straight => "Straight",
            PlayKind::FourOfKind => "Four of a Kind",
        }
    }
}

impl fmt::Display for PlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strictly consecutive ranks with no `Two` anywhere in the run.
fn is_straight(sorted: &[Card]) -> bool {
    if sorted.iter().any(|card| card.rank == Rank::Two) {
        return false;
    }

    sorted
        .windows(2)
        .all(|w| w[0].rank.next() == Some(w[1].rank))
}

/// A candidate action: the cards offered by one player in one turn.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Play {
    pub player: usize,
    cards: Vec<Card>,
    kind: Option<PlayKind>,
}

impl Play {
    pub fn new(player: usize, cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.sort();
        let kind = PlayKind::classify(&cards);
        Self { player, cards, kind }
    }

    pub fn pass(player: usize) -> Self {
        Self::new(player, &[])
    }

    /// The derived kind; `None` for structurally invalid card sets.
    pub fn kind(&self) -> Option<PlayKind> {
        self.kind
    }

    pub fn is_pass(&self) -> bool {
        self.kind == Some(PlayKind::Pass)
    }

    pub fn is_valid(&self) -> bool {
        self.kind.is_some()
    }

    /// Cards in ascending order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Highest card by total order; suit breaks rank ties.
    pub fn highest_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(PlayKind::Pass) => write!(f, "player {} passes", self.player),
            kind => {
                let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
                let name = kind.map_or("Invalid", PlayKind::name);
                write!(f, "player {} {} [{}]", self.player, name, cards.join(" "))
            }
        }
    }
}
