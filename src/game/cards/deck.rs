use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::basic::Card;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("Cannot deal {cards} cards evenly to {players} players")]
    UnevenDeal { cards: usize, players: usize },
}

/// The 52-card universe. Dealing consumes the deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: Card::all_cards(),
        }
    }

    /// Shuffle the deck. A seed gives a reproducible permutation, `None`
    /// draws fresh entropy for this call only.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.shuffle_with(&mut StdRng::seed_from_u64(seed)),
            None => self.shuffle_with(&mut rand::rng()),
        }
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Split the deck into `players` contiguous hands, each sorted ascending.
    pub fn deal(self, players: usize) -> Result<Vec<Vec<Card>>, DeckError> {
        let cards = self.cards.len();
        if players == 0 || cards % players != 0 {
            return Err(DeckError::UnevenDeal { cards, players });
        }

        let hands = self
            .cards
            .chunks(cards / players)
            .map(|chunk| {
                let mut hand = chunk.to_vec();
                hand.sort();
                hand
            })
            .collect();

        Ok(hands)
    }

    /// Restore the full, unshuffled deck.
    pub fn reset(&mut self) {
        self.cards = Card::all_cards();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::DECK_SIZE;
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_is_ordered_and_complete() {
        let deck = Deck::new();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.cards(), Card::all_cards().as_slice());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut first = Deck::new();
        let mut second = Deck::new();
        first.shuffle(Some(42));
        second.shuffle(Some(42));
        assert_eq!(first.cards(), second.cards());
        assert_ne!(first.cards(), Card::all_cards().as_slice());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut first = Deck::new();
        let mut second = Deck::new();
        first.shuffle(Some(1));
        second.shuffle(Some(2));
        assert_ne!(first.cards(), second.cards());
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut deck = Deck::new();
        deck.shuffle(None);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_deal_four_sorted_hands() {
        let mut deck = Deck::new();
        deck.shuffle(Some(7));
        let hands = deck.deal(4).unwrap();

        assert_eq!(hands.len(), 4);
        let mut all: Vec<Card> = Vec::new();
        for hand in &hands {
            assert_eq!(hand.len(), 13);
            assert!(hand.windows(2).all(|w| w[0] < w[1]));
            all.extend(hand);
        }
        all.sort();
        assert_eq!(all, Card::all_cards());
    }

    #[test]
    fn test_uneven_deal_fails() {
        assert_eq!(
            Deck::new().deal(5),
            Err(DeckError::UnevenDeal {
                cards: 52,
                players: 5
            })
        );
        assert!(Deck::new().deal(0).is_err());
    }

    #[test]
    fn test_reset_restores_order() {
        let mut deck = Deck::new();
        deck.shuffle(Some(3));
        deck.reset();
        assert_eq!(deck.cards(), Card::all_cards().as_slice());
    }
}
