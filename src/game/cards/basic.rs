use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Number of distinct cards in the deck.
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("Card index {0} is outside 0..=51")]
    IndexOutOfRange(usize),
    #[error("Invalid card notation: {0}")]
    InvalidNotation(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Suit::iter().nth(ordinal)
    }
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Clubs => "C",
                Suit::Diamonds => "D",
                Suit::Hearts => "H",
                Suit::Spades => "S",
            }
        )
    }
}

impl TryFrom<&str> for Suit {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "C" => Ok(Suit::Clubs),
            "D" => Ok(Suit::Diamonds),
            "H" => Ok(Suit::Hearts),
            "S" => Ok(Suit::Spades),
            _ => Err(s.to_string()),
        }
    }
}

/// Ranks in playing strength order: `Three` is the weakest, `Two` the strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Rank {
    Three = 0,
    Four = 1,
    Five = 2,
    Six = 3,
    Seven = 4,
    Eight = 5,
    Nine = 6,
    Ten = 7,
    Jack = 8,
    Queen = 9,
    King = 10,
    Ace = 11,
    Two = 12,
}

impl Rank {
    pub fn ordinal(self) -> usize {
        self as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Rank::iter().nth(ordinal)
    }

    /// The rank directly above this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "T",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
                Rank::Two => "2",
            }
        )
    }
}

impl TryFrom<&str> for Rank {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            "2" => Ok(Rank::Two),
            _ => Err(s.to_string()),
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.rank.cmp(&other.rank) {
            std::cmp::Ordering::Equal => self.suit.cmp(&other.suit),
            other => other,
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index in `0..52`: `3C` is 0 and `2S` is 51.
    pub fn to_index(self) -> usize {
        self.rank.ordinal() * 4 + self.suit.ordinal()
    }

    pub fn from_index(index: usize) -> Result<Self, CardError> {
        if index >= DECK_SIZE {
            return Err(CardError::IndexOutOfRange(index));
        }

        let rank = Rank::from_ordinal(index / 4).ok_or(CardError::IndexOutOfRange(index))?;
        let suit = Suit::from_ordinal(index % 4).ok_or(CardError::IndexOutOfRange(index))?;

        Ok(Self::new(rank, suit))
    }

    pub fn from_string(s: &str) -> Result<Self, CardError> {
        if s.len() != 2 || !s.is_ascii() {
            return Err(CardError::InvalidNotation(s.to_string()));
        }

        let rank = Rank::try_from(&s[0..1]).map_err(|_| CardError::InvalidNotation(s.to_string()))?;
        let suit = Suit::try_from(&s[1..2]).map_err(|_| CardError::InvalidNotation(s.to_string()))?;

        Ok(Self::new(rank, suit))
    }

    /// All 52 cards in ascending order (which is also index order).
    pub fn all_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::iter() {
            for suit in Suit::iter() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ordering() {
        let three_clubs = Card::new(Rank::Three, Suit::Clubs);
        let three_spades = Card::new(Rank::Three, Suit::Spades);
        let two_clubs = Card::new(Rank::Two, Suit::Clubs);
        let ace_spades = Card::new(Rank::Ace, Suit::Spades);

        assert!(three_spades > three_clubs); // Same rank, higher suit
        assert!(two_clubs > three_spades); // Higher rank beats higher suit
        assert!(two_clubs > ace_spades); // Two is the top rank
    }

    #[test]
    fn test_suit_ordering() {
        assert!(Suit::Clubs < Suit::Diamonds);
        assert!(Suit::Diamonds < Suit::Hearts);
        assert!(Suit::Hearts < Suit::Spades);
    }

    #[test]
    fn test_index_round_trip_covers_every_card() {
        let mut seen = [false; DECK_SIZE];
        for card in Card::all_cards() {
            let index = card.to_index();
            assert!(!seen[index], "index {} produced twice", index);
            seen[index] = true;
            assert_eq!(Card::from_index(index), Ok(card));
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_index_endpoints() {
        assert_eq!(Card::new(Rank::Three, Suit::Clubs).to_index(), 0);
        assert_eq!(Card::new(Rank::Three, Suit::Diamonds).to_index(), 1);
        assert_eq!(Card::new(Rank::Two, Suit::Spades).to_index(), 51);
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(Card::from_index(52), Err(CardError::IndexOutOfRange(52)));
        assert_eq!(Card::from_index(usize::MAX), Err(CardError::IndexOutOfRange(usize::MAX)));
    }

    #[test]
    fn test_all_cards_sorted_and_unique() {
        let cards = Card::all_cards();
        assert_eq!(cards.len(), DECK_SIZE);
        assert!(cards.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_card_from_string() {
        let king_hearts = Card::from_string("KH").unwrap();
        assert_eq!(king_hearts, Card::new(Rank::King, Suit::Hearts));

        let ten_clubs = Card::from_string("TC").unwrap();
        assert_eq!(ten_clubs, Card::new(Rank::Ten, Suit::Clubs));

        assert!(Card::from_string("ZH").is_err()); // Invalid rank
        assert!(Card::from_string("KX").is_err()); // Invalid suit
        assert!(Card::from_string("K").is_err());
        assert!(Card::from_string("KHS").is_err());
        assert!(Card::from_string("").is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for card in Card::all_cards() {
            assert_eq!(Card::from_string(&card.to_string()), Ok(card));
        }
    }

    #[test]
    fn test_rank_next() {
        assert_eq!(Rank::Three.next(), Some(Rank::Four));
        assert_eq!(Rank::Ace.next(), Some(Rank::Two));
        assert_eq!(Rank::Two.next(), None);
    }
}
