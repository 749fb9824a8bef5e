//! Coordinate and direction math for a fixed `width x height` grid.
//!
//! Cells are addressed by a linear index `y * width + x`. Conversions are
//! bounds-checked and total: out-of-range coordinates yield `None` rather
//! than panicking.
use super::team::Team;

/// Linear index of one board cell (`y * width + x`).
pub type CellIndex = usize;

/// Coordinates of a cell, possibly off the board.
///
/// Signed so that deltas can walk past the edges; validity is decided by
/// the board's bounds check.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Coords {
    pub x: i16,
    pub y: i16,
}
impl Coords {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}
impl std::ops::Add<Delta> for Coords {
    type Output = Coords;

    #[inline]
    fn add(self, rhs: Delta) -> Self::Output {
        Coords::new(self.x + rhs.dx as i16, self.y + rhs.dy as i16)
    }
}
impl std::ops::AddAssign<Delta> for Coords {
    #[inline]
    fn add_assign(&mut self, rhs: Delta) {
        *self = *self + rhs
    }
}

/// Deltas represent directions in which pieces can move.
///
/// They can be added to [Coords] to obtain the target of the translation
/// following this delta.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Delta {
    pub dx: i8,
    pub dy: i8,
}
impl Delta {
    #[inline]
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    pub const ORTHOGONAL: [Self; 4] = [
        Self::new(0, -1),
        Self::new(1, 0),
        Self::new(0, 1),
        Self::new(-1, 0),
    ];
    pub const DIAGONAL: [Self; 4] = [
        Self::new(-1, -1),
        Self::new(1, -1),
        Self::new(-1, 1),
        Self::new(1, 1),
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::new(0, -1),
        Self::new(1, 0),
        Self::new(0, 1),
        Self::new(-1, 0),
        Self::new(-1, -1),
        Self::new(1, -1),
        Self::new(-1, 1),
        Self::new(1, 1),
    ];
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::new(-1, -2),
        Self::new(1, -2),
        Self::new(2, -1),
        Self::new(2, 1),
        Self::new(1, 2),
        Self::new(-1, 2),
        Self::new(-2, 1),
        Self::new(-2, -1),
    ];

    /// The forward direction of a team's pawns. Team 0 sits on the
    /// high-`y` rows and advances towards row 0.
    #[inline]
    pub const fn forward(team: Team) -> Self {
        match team {
            Team::White => Self::new(0, -1),
            Team::Black => Self::new(0, 1),
        }
    }
}

/// Team-relative rank of a row: counted from the team's own back row,
/// starting at 1.
///
/// Pawns double-step from rank 2 and promote on rank 8 (for the standard
/// board height).
#[inline]
pub const fn team_rank(team: Team, y: i16, height: i16) -> i16 {
    match team {
        Team::White => height - y,
        Team::Black => y + 1,
    }
}
