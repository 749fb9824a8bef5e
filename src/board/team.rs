/// The two sides of the game.
#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Team {
    White = 0,
    Black = 1,
}
impl Team {
    /// Returns the opposing team.
    #[inline]
    pub fn opponent(self) -> Self {
        if self == Team::White {
            Team::Black
        } else {
            Team::White
        }
    }

    /// Checks if the team variant is white.
    #[inline]
    pub fn is_white(self) -> bool {
        self == Team::White
    }
}
impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::White => "white",
                Self::Black => "black",
            }
        )
    }
}
