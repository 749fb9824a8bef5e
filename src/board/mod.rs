//! # Core board API
//!
//! Everything needed to represent a position and decide move legality:
//! the cell grid, pieces, reversible actions, per-piece rules and the
//! end-of-game queries.

pub mod action;
pub mod cell;
pub mod piece;
pub mod position;
pub mod rows;
mod rules;
pub mod team;

pub use action::{invert, Action, CompoundMove};
pub use cell::{team_rank, CellIndex, Coords, Delta};
pub use piece::{Piece, PieceKind};
pub use position::Board;
pub use rows::RowsError;
pub use team::Team;
