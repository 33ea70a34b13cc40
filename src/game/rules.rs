//! Legality tables and the beats relation.
//!
//! A [`Ruleset`] is plain data: which kinds are admitted, which cross-kind
//! wins exist, and the preset's opening card and action-space size. The
//! beats relation and the legal-move enumeration are both derived from it,
//! so the straights preset and the three-of-a-kind variant share one engine.

use std::collections::BTreeMap;

use super::cards::{Card, Play, PlayKind, Rank, Suit};

/// A cross-kind win: a `play` of this kind beats a `last` play of that kind
/// regardless of ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    pub play: PlayKind,
    pub last: PlayKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ruleset {
    pub name: &'static str,
    /// Non-pass kinds a player may lead or answer with.
    pub kinds: &'static [PlayKind],
    pub min_straight_len: usize,
    pub overrides: &'static [Override],
    /// When set, an override only applies between plays whose card counts
    /// have the same parity.
    pub parity_blocking: bool,
    /// Holder of this card opens the first round.
    pub opening_card: Card,
    /// Number of distinct encoded actions an adapter must reserve.
    pub action_space_size: usize,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::STRAIGHTS
    }
}

impl Ruleset {
    /// Canonical rules: 3+ card runs that beat singles and lose to pairs.
    /// Actions: pass 1 + singles 52 + pairs 78 + straights 50 + quads 13.
    pub const STRAIGHTS: Ruleset = Ruleset {
        name: "straights",
        kinds: &[
            PlayKind::Single,
            PlayKind::Pair,
            PlayKind::Straight,
            PlayKind::FourOfKind,
        ],
        min_straight_len: 3,
        overrides: &[
            Override {
                play: PlayKind::FourOfKind,
                last: PlayKind::Pair,
            },
            Override {
                play: PlayKind::Straight,
                last: PlayKind::Single,
            },
        ],
        parity_blocking: false,
        opening_card: Card {
            rank: Rank::Three,
            suit: Suit::Diamonds,
        },
        action_space_size: 194,
    };

    /// Three-of-a-kind variant without straights.
    /// Actions: pass 1 + singles 52 + pairs 78 + triples 13 + quads 13.
    pub const TRIPLES: Ruleset = Ruleset {
        name: "triples",
        kinds: &[
            PlayKind::Single,
            PlayKind::Pair,
            PlayKind::Triple,
            PlayKind::FourOfKind,
        ],
        min_straight_len: 3,
        overrides: &[
            Override {
                play: PlayKind::Triple,
                last: PlayKind::Single,
            },
            Override {
                play: PlayKind::FourOfKind,
                last: PlayKind::Pair,
            },
            Override {
                play: PlayKind::FourOfKind,
                last: PlayKind::Single,
            },
        ],
        parity_blocking: true,
        opening_card: Card {
            rank: Rank::Three,
            suit: Suit::Clubs,
        },
        action_space_size: 157,
    };

    /// Whether the play has an admitted shape under this ruleset.
    pub fn admits(&self, play: &Play) -> bool {
        match play.kind() {
            None => false,
            Some(PlayKind::Pass) => true,
            Some(PlayKind::Straight) => {
                self.kinds.contains(&PlayKind::Straight) && play.len() >= self.min_straight_len
            }
            Some(kind @ (PlayKind::Single
            | PlayKind::Pair
            | PlayKind::Triple
            | PlayKind::FourOfKind)) => self.kinds.contains(&kind),
        }
    }

    fn overrides(&self, play: &Play, last: &Play) -> bool {
        let (Some(play_kind), Some(last_kind)) = (play.kind(), last.kind()) else {
            return false;
        };

        if self.parity_blocking && play.len() % 2 != last.len() % 2 {
            return false;
        }

        self.overrides
            .iter()
            .any(|o| o.play == play_kind && o.last == last_kind)
    }

    /// Whether `play` is a legal answer to `last`.
    ///
    /// A pass is always legal. With no last play (or a pass) any admitted
    /// play is legal.
    pub fn can_beat(&self, play: &Play, last: Option<&Play>) -> bool {
        if play.is_pass() {
            return true;
        }

        if !self.admits(play) {
            return false;
        }

        let last = match last {
            Some(last) if !last.is_pass() => last,
            _ => return true,
        };

        if play.kind() != last.kind() {
            return self.overrides(play, last);
        }

        if play.kind() == Some(PlayKind::Straight) && play.len() != last.len() {
            return false;
        }

        match (play.highest_card(), last.highest_card()) {
            (Some(ours), Some(theirs)) => ours > theirs,
            _ => false,
        }
    }

    /// Every legal play from `hand` against `last`, pass first.
    pub fn valid_plays(&self, hand: &[Card], last: Option<&Play>) -> Vec<Vec<Card>> {
        let mut plays = vec![Vec::new()];
        let candidates = Candidates::new(hand);

        for kind in self.kinds {
            for cards in candidates.of_kind(*kind, self.min_straight_len) {
                // Player id is irrelevant to legality.
                if self.can_beat(&Play::new(0, &cards), last) {
                    plays.push(cards);
                }
            }
        }

        plays
    }

    /// Owner of the strongest non-pass play in a trick, if anyone played.
    pub fn trick_winner(&self, plays: &[Play]) -> Option<usize> {
        let mut best: Option<&Play> = None;
        for play in plays.iter().filter(|p| !p.is_pass()) {
            if best.map_or(true, |b| self.can_beat(play, Some(b))) {
                best = Some(play);
            }
        }
        best.map(|p| p.player)
    }

    pub fn holds_opening_card(&self, hand: &[Card]) -> bool {
        hand.contains(&self.opening_card)
    }
}

/// Candidate combinations of a hand, grouped by rank.
struct Candidates {
    by_rank: BTreeMap<Rank, Vec<Card>>,
}

impl Candidates {
    fn new(hand: &[Card]) -> Self {
        let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
        for card in hand {
            by_rank.entry(card.rank).or_default().push(*card);
        }
        for cards in by_rank.values_mut() {
            cards.sort();
        }
        Self { by_rank }
    }

    fn of_kind(&self, kind: PlayKind, min_straight_len: usize) -> Vec<Vec<Card>> {
        match kind {
            PlayKind::Pass => vec![Vec::new()],
            PlayKind::Single => self.by_rank.values().flatten().map(|c| vec![*c]).collect(),
            PlayKind::Pair => self.top_of_each_rank(2),
            PlayKind::Triple => self.top_of_each_rank(3),
            PlayKind::FourOfKind => self.top_of_each_rank(4),
            PlayKind::Straight => self.straights(min_straight_len),
        }
    }

    /// One set per rank held at least `size` times, using the highest suits.
    fn top_of_each_rank(&self, size: usize) -> Vec<Vec<Card>> {
        self.by_rank
            .values()
            .filter(|cards| cards.len() >= size)
            .map(|cards| cards[cards.len() - size..].to_vec())
            .collect()
    }

    /// Every sub-run of at least `min_len` consecutive ranks, each rank
    /// represented by its highest suit. Twos never take part.
    fn straights(&self, min_len: usize) -> Vec<Vec<Card>> {
        let highest: Vec<Card> = self
            .by_rank
            .iter()
            .filter(|(rank, _)| **rank != Rank::Two)
            .filter_map(|(_, cards)| cards.last().copied())
            .collect();

        let mut runs: Vec<&[Card]> = Vec::new();
        let mut start = 0;
        for i in 1..=highest.len() {
            let broken = i == highest.len() || highest[i - 1].rank.next() != Some(highest[i].rank);
            if broken {
                runs.push(&highest[start..i]);
                start = i;
            }
        }

        let mut straights = Vec::new();
        for run in runs {
            for from in 0..run.len() {
                for to in (from + min_len)..=run.len() {
                    straights.push(run[from..to].to_vec());
                }
            }
        }
        straights
    }
}
