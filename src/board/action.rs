//! # Actions
//!
//! Actions are the only primitive through which a board is ever mutated.
//! Each one has an exact closed-form inverse, which is what lets the
//! legality filter test a move and restore the board without cloning it.
use super::{cell::CellIndex, piece::Piece};

/// An atomic, exactly-invertible board mutation.
///
/// For `Move`, `piece.move_count` is the count *after* the move; inverting
/// swaps the endpoints and decrements it by one.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Action {
    Add { cell: CellIndex, piece: Piece },
    Remove { cell: CellIndex, piece: Piece },
    Move {
        from: CellIndex,
        to: CellIndex,
        piece: Piece,
    },
}
impl Action {
    /// The exact inverse of this action.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Add { cell, piece } => Self::Remove { cell, piece },
            Self::Remove { cell, piece } => Self::Add { cell, piece },
            Self::Move { from, to, mut piece } => {
                piece.move_count -= 1;
                Self::Move {
                    from: to,
                    to: from,
                    piece,
                }
            }
        }
    }
}

/// One player decision, resolved to its concrete actions.
///
/// At most four actions: a capturing pawn promotion is
/// Remove + Move + Remove + Add.
pub type CompoundMove = heapless::Vec<Action, 4>;

/// The exact reverse of a list of actions: order-reversed, each action
/// inverted. Applying `invert(actions)` after `actions` is a no-op on
/// board occupancy and move counts.
pub fn invert(actions: &[Action]) -> CompoundMove {
    actions.iter().rev().map(|action| action.inverse()).collect()
}
