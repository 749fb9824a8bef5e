use super::team::Team;

/// Existing kinds of pieces.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// The letter used for this kind in the row-string board format
    /// (team 0 casing).
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// A piece kind from its uppercase row-format letter.
    ///
    /// Fails on anything that is not one of `P R N B Q K`.
    #[inline]
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'P' => Self::Pawn,
            'R' => Self::Rook,
            'N' => Self::Knight,
            'B' => Self::Bishop,
            'Q' => Self::Queen,
            'K' => Self::King,
            _ => return None,
        })
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter().to_ascii_lowercase())
    }
}

/// A piece standing on the board.
///
/// `move_count` increments exactly once per executed Move action affecting
/// the piece; castling and en passant eligibility depend on it.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub move_count: u32,
}
impl Piece {
    /// A piece that has not moved yet.
    #[inline]
    pub const fn new(kind: PieceKind, team: Team) -> Self {
        Self {
            kind,
            team,
            move_count: 0,
        }
    }

    /// The letter this piece shows up as in the row-string format:
    /// uppercase for team 0 (white), lowercase for team 1 (black).
    #[inline]
    pub fn letter(self) -> char {
        if self.team.is_white() {
            self.kind.letter()
        } else {
            self.kind.letter().to_ascii_lowercase()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(PieceKind::from_letter('X'), None);
        assert_eq!(PieceKind::from_letter('p'), None);
    }

    #[test]
    fn piece_letter_casing_follows_team() {
        assert_eq!(Piece::new(PieceKind::Knight, Team::White).letter(), 'N');
        assert_eq!(Piece::new(PieceKind::Knight, Team::Black).letter(), 'n');
    }
}
