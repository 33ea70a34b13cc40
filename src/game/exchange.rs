//! Card exchange between rounds.
//!
//! The Slave hands its two best cards to the King and the Commoner its best
//! card to the Queen, unconditionally. The King and Queen choose what to give
//! back; an unusable choice falls back to their lowest cards.

use tracing::debug;

use super::cards::Card;
use super::positions::Position;

/// Cards the King and Slave trade.
pub const KING_SLAVE_CARDS: usize = 2;
/// Cards the Queen and Commoner trade.
pub const QUEEN_COMMONER_CARDS: usize = 1;

/// The `count` highest cards of a hand, best first.
pub fn tribute(hand: &[Card], count: usize) -> Vec<Card> {
    let mut sorted = hand.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted.truncate(count);
    sorted
}

/// The `count` lowest cards of a hand, lowest first.
pub fn lowest(hand: &[Card], count: usize) -> Vec<Card> {
    let mut sorted = hand.to_vec();
    sorted.sort();
    sorted.truncate(count);
    sorted
}

/// The cards a giver actually surrenders.
///
/// The request is honoured only if it names exactly `count` distinct cards
/// that are all in `hand`; otherwise the `count` lowest cards are used.
pub fn resolve_gift(hand: &[Card], requested: Option<&[Card]>, count: usize) -> Vec<Card> {
    match requested {
        Some(cards) if is_usable(hand, cards, count) => cards.to_vec(),
        Some(cards) => {
            debug!(requested = ?cards, "Unusable gift request, giving lowest cards");
            lowest(hand, count)
        }
        None => lowest(hand, count),
    }
}

fn is_usable(hand: &[Card], cards: &[Card], count: usize) -> bool {
    if cards.len() != count || !cards.iter().all(|card| hand.contains(card)) {
        return false;
    }
    cards
        .iter()
        .enumerate()
        .all(|(i, card)| !cards[..i].contains(card))
}

/// Move `cards` from one hand to another. Cards missing from `from` are skipped.
pub fn transfer(hands: &mut [Vec<Card>], from: usize, to: usize, cards: &[Card]) {
    for card in cards {
        if let Some(pos) = hands[from].iter().position(|c| c == card) {
            let moved = hands[from].remove(pos);
            hands[to].push(moved);
        }
    }
}

fn holder(positions: &[Option<Position>], position: Position) -> Option<usize> {
    positions.iter().position(|p| *p == Some(position))
}

/// Run both exchanges over freshly dealt hands and re-sort every hand.
///
/// Pairs with a missing seat are skipped. Both gifts in a pair are resolved
/// against the pre-exchange hands, so a giver never hands back what it was
/// just given.
pub fn exchange_cards(
    hands: &mut [Vec<Card>],
    positions: &[Option<Position>],
    king_gives: Option<&[Card]>,
    queen_gives: Option<Card>,
) {
    let queen_request = queen_gives.map(|card| [card]);
    let pairs = [
        (Position::King, Position::Slave, king_gives, KING_SLAVE_CARDS),
        (
            Position::Queen,
            Position::Commoner,
            queen_request.as_ref().map(|c| c.as_slice()),
            QUEEN_COMMONER_CARDS,
        ),
    ];

    for (upper, lower, request, count) in pairs {
        let (Some(upper_id), Some(lower_id)) = (holder(positions, upper), holder(positions, lower))
        else {
            continue;
        };

        let owed = tribute(&hands[lower_id], count);
        let gift = resolve_gift(&hands[upper_id], request, count);
        debug!(
            upper = %upper,
            lower = %lower,
            received = ?owed,
            returned = ?gift,
            "Exchanging cards"
        );

        transfer(hands, lower_id, upper_id, &owed);
        transfer(hands, upper_id, lower_id, &gift);
    }

    for hand in hands.iter_mut() {
        hand.sort();
    }
}
