use std::fmt;

use tracing::info;

/// Finishing hierarchy, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Position {
    King,
    Queen,
    Commoner,
    Slave,
}

impl Position {
    /// Positions in finishing order.
    pub const ALL: [Position; 4] = [
        Position::King,
        Position::Queen,
        Position::Commoner,
        Position::Slave,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Position::King => "King",
                Position::Queen => "Queen",
                Position::Commoner => "Commoner",
                Position::Slave => "Slave",
            }
        )
    }
}

/// The previous King, if the demotion rule would fire for this first finisher.
pub fn demoted_king(
    first_finisher: usize,
    previous_king: Option<usize>,
    is_first_round: bool,
) -> Option<usize> {
    if is_first_round {
        return None;
    }
    previous_king.filter(|king| *king != first_finisher)
}

/// Map a complete finish order onto positions, indexed by player id.
///
/// Normally the finish order reads King, Queen, Commoner, Slave. When a
/// previous King is beaten to first place outside the first round, the
/// first finisher is King, the old King is Slave, and the other two take
/// Queen and Commoner in finish order.
pub fn assign_positions(
    finished_order: &[usize],
    previous_king: Option<usize>,
    is_first_round: bool,
) -> Vec<Option<Position>> {
    let players = finished_order.len();
    let mut positions = vec![None; players];

    let demoted = finished_order
        .first()
        .and_then(|first| demoted_king(*first, previous_king, is_first_round));

    match (finished_order.first(), demoted) {
        (Some(&king), Some(old_king)) if old_king < players => {
            info!(new_king = king, old_king, "King demoted to Slave");
            positions[king] = Some(Position::King);
            positions[old_king] = Some(Position::Slave);

            let middle = finished_order
                .iter()
                .filter(|p| **p != king && **p != old_king);
            for (player, position) in middle.zip([Position::Queen, Position::Commoner]) {
                positions[*player] = Some(position);
            }
        }
        _ => {
            for (player, position) in finished_order.iter().zip(Position::ALL) {
                positions[*player] = Some(position);
            }
        }
    }

    positions
}
