//! Main API to represent and interact with a board.
//!
//! This includes loading a position from row strings, generating and
//! performing moves, and the end-of-game queries (check, checkmate,
//! stalemate).
use super::{
    action::{self, Action, CompoundMove},
    cell::{CellIndex, Coords, Delta},
    piece::{Piece, PieceKind},
    rows::{self, RowsError},
    rules,
    team::Team,
};

/// The canonical board: a `width x height` grid of cells, each empty or
/// holding one piece, plus the ordered history of every action applied to
/// it.
///
/// The board is created once per game and mutated only through action
/// application. The legality filter mutates it transiently while testing
/// candidate moves, but always restores it within the same call; no
/// caller ever observes the intermediate state.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Piece>>,
    history: Vec<Action>,
}
impl Board {
    /// Creates a board from the row-string format: one string per row,
    /// row 0 being team 1's back rank, `.` for empty cells and the
    /// letters `P R N B Q K` (uppercase team 0, lowercase team 1) for
    /// pieces.
    /// # Errors
    /// This function returns an error if the rows are empty, ragged, or
    /// contain an unknown piece letter.
    pub fn from_rows(rows: &[&str]) -> Result<Self, RowsError> {
        let (width, height, cells) = rows::parse(rows)?;
        Ok(Self {
            width,
            height,
            cells,
            history: Vec::new(),
        })
    }

    /// The standard 8x8 starting position.
    pub fn standard() -> Self {
        Self::from_rows(&[
            "rnbqkbnr",
            "pppppppp",
            "........",
            "........",
            "........",
            "........",
            "PPPPPPPP",
            "RNBQKBNR",
        ])
        .unwrap()
    }

    /// Serializes current occupancy back into the row-string format.
    pub fn to_rows(&self) -> Vec<String> {
        rows::serialize(self.width, &self.cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The linear index of the cell at `at`, or `None` when the
    /// coordinates fall outside the grid.
    #[inline]
    pub fn cell_index(&self, at: Coords) -> Option<CellIndex> {
        self.on_board(at).then(|| self.index_of(at))
    }

    /// The coordinates of a valid cell index.
    #[inline]
    pub fn coords(&self, index: CellIndex) -> Coords {
        Coords::new((index % self.width) as i16, (index / self.width) as i16)
    }

    #[inline]
    pub fn on_board(&self, at: Coords) -> bool {
        (0..self.width as i16).contains(&at.x) && (0..self.height as i16).contains(&at.y)
    }

    // Index of coordinates already known to be on the board.
    #[inline]
    pub(crate) fn index_of(&self, at: Coords) -> CellIndex {
        debug_assert!(self.on_board(at));
        at.y as usize * self.width + at.x as usize
    }

    /// The piece on a cell, if any. Out-of-range indices read as empty.
    #[inline]
    pub fn piece(&self, index: CellIndex) -> Option<Piece> {
        self.cells.get(index).copied().flatten()
    }

    #[inline]
    pub fn is_empty(&self, index: CellIndex) -> bool {
        self.piece(index).is_none()
    }

    /// Checks whether a cell holds a piece of the opposing team.
    #[inline]
    pub fn has_opponent(&self, index: CellIndex, team: Team) -> bool {
        self.piece(index).is_some_and(|piece| piece.team != team)
    }

    /// Walks `delta` from `origin` for at most `max_distance` steps,
    /// collecting cell indices. The walk stops at the board edge, or
    /// inclusively at the first occupied cell: a ray that hits a piece
    /// ends with that piece's cell.
    ///
    /// An out-of-range origin yields an empty ray.
    pub fn cast_ray(&self, origin: Coords, delta: Delta, max_distance: usize) -> Vec<CellIndex> {
        let mut ray = Vec::new();
        if !self.on_board(origin) {
            return ray;
        }
        let mut at = origin;
        for _ in 0..max_distance {
            at += delta;
            if !self.on_board(at) {
                break;
            }
            let index = self.index_of(at);
            ray.push(index);
            if !self.is_empty(index) {
                break;
            }
        }
        ray
    }

    /// An iterator over every occupied cell and its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (CellIndex, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (index, piece)))
    }

    /// The cells holding pieces of a given team.
    pub fn team_cells(&self, team: Team) -> Vec<CellIndex> {
        self.pieces()
            .filter(|(_, piece)| piece.team == team)
            .map(|(index, _)| index)
            .collect()
    }

    /// The cells holding a given team's kings. Usually one, but nothing
    /// here enforces that: check is defined over all of them.
    pub fn king_cells(&self, team: Team) -> Vec<CellIndex> {
        self.pieces()
            .filter(|(_, piece)| piece.team == team && piece.kind == PieceKind::King)
            .map(|(index, _)| index)
            .collect()
    }

    /// The chronological log of every applied action.
    #[inline]
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Applies a list of actions in order, recording each in the history.
    ///
    /// Actions are always engine-generated; applying one that is
    /// inconsistent with current occupancy is a programming error and
    /// fails an assertion rather than returning an error.
    pub fn apply(&mut self, actions: &[Action]) {
        for &action in actions {
            self.apply_one(action);
            self.history.push(action);
        }
    }

    /// Reverts a just-applied list of actions, restoring occupancy, move
    /// counts and history length to their values before [Self::apply].
    pub fn undo(&mut self, actions: &[Action]) {
        let checkpoint = self.history.len() - actions.len();
        for &action in action::invert(actions).iter() {
            self.apply_one(action);
        }
        self.history.truncate(checkpoint);
    }

    fn apply_one(&mut self, action: Action) {
        match action {
            Action::Add { cell, piece } => {
                debug_assert!(self.cells[cell].is_none(), "add into occupied cell");
                self.cells[cell] = Some(piece);
            }
            Action::Remove { cell, piece } => {
                debug_assert_eq!(self.cells[cell], Some(piece), "remove of absent piece");
                self.cells[cell] = None;
            }
            Action::Move { from, to, piece } => {
                debug_assert!(self.cells[from].is_some(), "move from empty cell");
                debug_assert!(self.cells[to].is_none(), "move into occupied cell");
                self.cells[from] = None;
                self.cells[to] = Some(piece);
            }
        }
    }

    /// Pseudo-legal target cells of the piece on `origin`, ignoring king
    /// safety. Empty when the cell is empty or out of range.
    pub fn candidate_targets(&mut self, origin: CellIndex) -> Vec<CellIndex> {
        rules::candidate_targets(self, origin)
    }

    /// The cells the piece on `origin` genuinely threatens to capture on.
    /// A subset of its candidate targets; a king's castle targets are
    /// never attack cells.
    pub fn attack_cells(&self, origin: CellIndex) -> Vec<CellIndex> {
        rules::attack_cells(self, origin)
    }

    /// Checks whether any of `team`'s kings stands on a cell attacked by
    /// an opposing piece. A team with no king on the board is never in
    /// check.
    pub fn is_in_check(&self, team: Team) -> bool {
        let kings = self.king_cells(team);
        if kings.is_empty() {
            return false;
        }
        self.pieces()
            .filter(|(_, piece)| piece.team != team)
            .flat_map(|(index, _)| rules::attack_cells(self, index))
            .any(|attacked| kings.contains(&attacked))
    }

    /// Legal target cells of the piece on `origin`: its candidate targets
    /// minus those that would leave the mover's own king in check.
    ///
    /// Each candidate is resolved to the concrete actions real play would
    /// use (castle, en passant and promotion included), applied, tested,
    /// and reverted; the board and history come out of this exactly as
    /// they went in.
    pub fn legal_targets(&mut self, origin: CellIndex) -> Vec<CellIndex> {
        let Some(piece) = self.piece(origin) else {
            return Vec::new();
        };
        self.candidate_targets(origin)
            .into_iter()
            .filter(|&target| {
                let compound = rules::resolve_target(self, origin, target);
                !self.puts_king_in_check(&compound, piece.team)
            })
            .collect()
    }

    /// Resolves and applies the move `from -> to`, returning the applied
    /// actions for the caller to translate into events. Returns `None`
    /// without touching the board when `to` is not a legal target of
    /// `from`.
    pub fn perform_action(&mut self, from: CellIndex, to: CellIndex) -> Option<CompoundMove> {
        if !self.legal_targets(from).contains(&to) {
            return None;
        }
        let compound = rules::resolve_target(self, from, to);
        self.apply(&compound);
        log::debug!(
            "performed {from} -> {to} ({} actions, history {})",
            compound.len(),
            self.history.len()
        );
        Some(compound)
    }

    /// Checkmate: in check with no legal move anywhere.
    pub fn is_checkmate(&mut self, team: Team) -> bool {
        self.is_in_check(team) && !self.has_any_legal_target(team)
    }

    /// Stalemate: not in check, but no legal move anywhere.
    pub fn is_stalemate(&mut self, team: Team) -> bool {
        !self.is_in_check(team) && !self.has_any_legal_target(team)
    }

    fn has_any_legal_target(&mut self, team: Team) -> bool {
        self.team_cells(team)
            .into_iter()
            .any(|cell| !self.legal_targets(cell).is_empty())
    }

    /// Make-test-unmake: applies `actions`, reads the check state of
    /// `team`, then restores the board and history exactly.
    pub(crate) fn puts_king_in_check(&mut self, actions: &[Action], team: Team) -> bool {
        let checkpoint = self.history.len();
        self.apply(actions);
        let in_check = self.is_in_check(team);
        self.undo(actions);
        debug_assert_eq!(self.history.len(), checkpoint);
        in_check
    }

    /// Tests a bare relocation of the piece on `from` (castle transit
    /// cells are probed this way, without re-entering move resolution).
    pub(crate) fn step_puts_king_in_check(
        &mut self,
        from: CellIndex,
        to: CellIndex,
        team: Team,
    ) -> bool {
        let Some(piece) = self.piece(from) else {
            return false;
        };
        let mut compound = CompoundMove::new();
        // Capacity 4 covers the two actions pushed here.
        unsafe {
            if let Some(occupant) = self.piece(to) {
                compound.push_unchecked(Action::Remove {
                    cell: to,
                    piece: occupant,
                });
            }
            compound.push_unchecked(Action::Move {
                from,
                to,
                piece: Piece {
                    move_count: piece.move_count + 1,
                    ..piece
                },
            });
        }
        self.puts_king_in_check(&compound, team)
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            for letter in row.chars() {
                write!(f, "{letter} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "history: {} actions", self.history.len())
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cell(name: &str) -> CellIndex {
        let bytes = name.as_bytes();
        let x = (bytes[0] - b'a') as usize;
        let rank = (bytes[1] - b'0') as usize;
        (8 - rank) * 8 + x
    }

    #[test]
    fn rows_round_trip() {
        let rows = [
            "rnbqkbnr", "pppppppp", "........", "........", "........",
            "........", "PPPPPPPP", "RNBQKBNR",
        ];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn cell_index_is_bounds_checked() {
        let board = Board::standard();
        assert_eq!(board.cell_index(Coords::new(0, 0)), Some(0));
        assert_eq!(board.cell_index(Coords::new(7, 7)), Some(63));
        assert_eq!(board.cell_index(Coords::new(8, 0)), None);
        assert_eq!(board.cell_index(Coords::new(0, -1)), None);
        assert_eq!(board.coords(63), Coords::new(7, 7));
    }

    #[test]
    fn rays_stop_inclusively_at_occupants() {
        let board = Board::standard();
        // North from the empty a3: three empty cells, then the black pawn
        // on a7, and nothing past it.
        let ray = board.cast_ray(board.coords(cell("a3")), Delta::new(0, -1), 8);
        assert_eq!(ray, vec![cell("a4"), cell("a5"), cell("a6"), cell("a7")]);
        // Blocked immediately: the pawn on a2 ends the ray from a1.
        let ray = board.cast_ray(board.coords(cell("a1")), Delta::new(0, -1), 8);
        assert_eq!(ray, vec![cell("a2")]);
        // Off-board origin gives nothing.
        assert!(board.cast_ray(Coords::new(-1, 0), Delta::new(1, 0), 8).is_empty());
    }

    #[test]
    fn legality_probing_leaves_no_trace() {
        let mut board = Board::standard();
        let before = board.clone();
        for index in 0..64 {
            board.legal_targets(index);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn apply_undo_is_identity() {
        let mut board = Board::standard();
        let before = board.clone();
        let compound = board.perform_action(cell("e2"), cell("e4")).unwrap();
        assert_eq!(board.history().len(), 1);
        board.undo(&compound);
        assert_eq!(board, before);
        assert!(board.history().is_empty());
    }

    #[test]
    fn move_increments_move_count_once() {
        let mut board = Board::standard();
        board.perform_action(cell("e2"), cell("e4")).unwrap();
        assert_eq!(board.piece(cell("e4")).unwrap().move_count, 1);
        board.perform_action(cell("e4"), cell("e5")).unwrap();
        assert_eq!(board.piece(cell("e5")).unwrap().move_count, 2);
    }

    #[test]
    fn opening_symmetry() {
        let mut board = Board::standard();
        assert!(board.legal_targets(cell("e2")).contains(&cell("e4")));
        board.perform_action(cell("e2"), cell("e4")).unwrap();
        assert!(board.legal_targets(cell("e7")).contains(&cell("e5")));
        board.perform_action(cell("e7"), cell("e5")).unwrap();
        assert!(!board.is_in_check(Team::White));
        assert!(!board.is_in_check(Team::Black));
    }

    #[test]
    fn empty_or_out_of_range_origin_has_no_targets() {
        let mut board = Board::standard();
        assert!(board.legal_targets(cell("e4")).is_empty());
        assert!(board.legal_targets(1000).is_empty());
    }

    #[test]
    fn capture_removes_before_moving() {
        let mut board = Board::from_rows(&[
            "....k...",
            "........",
            "........",
            "...r....",
            "....P...",
            "........",
            "........",
            "....K...",
        ])
        .unwrap();
        let compound = board.perform_action(cell("e4"), cell("d5")).unwrap();
        assert_eq!(compound.len(), 2);
        assert!(matches!(compound[0], Action::Remove { .. }));
        assert!(matches!(compound[1], Action::Move { .. }));
        assert_eq!(board.piece(cell("d5")).unwrap().kind, PieceKind::Pawn);
        assert_eq!(board.piece(cell("d5")).unwrap().team, Team::White);
    }

    #[test]
    fn moving_a_pinned_piece_is_illegal() {
        let mut board = Board::from_rows(&[
            "....k...",
            "........",
            "........",
            "....r...",
            "........",
            "....N...",
            "........",
            "....K...",
        ])
        .unwrap();
        // The knight on e3 shields the white king from the rook on e5.
        assert!(board.legal_targets(cell("e3")).is_empty());
        assert!(!board.candidate_targets(cell("e3")).is_empty());
    }

    #[test]
    fn back_rank_checkmate() {
        let mut board = Board::from_rows(&[
            "R......k",
            "......pp",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....K...",
        ])
        .unwrap();
        assert!(board.is_in_check(Team::Black));
        assert!(board.is_checkmate(Team::Black));
        assert!(!board.is_stalemate(Team::Black));
        assert!(!board.is_checkmate(Team::White));
        for cell in board.team_cells(Team::Black) {
            assert!(board.legal_targets(cell).is_empty());
        }
    }

    #[test]
    fn boxed_king_stalemate() {
        let mut board = Board::from_rows(&[
            ".......k",
            "........",
            "......Q.",
            "........",
            "........",
            "........",
            "........",
            "K.......",
        ])
        .unwrap();
        assert!(!board.is_in_check(Team::Black));
        assert!(board.is_stalemate(Team::Black));
        assert!(!board.is_checkmate(Team::Black));
        assert!(!board.is_stalemate(Team::White));
    }

    #[test]
    fn any_attacked_king_counts_as_check() {
        // Nothing enforces a single king per team; check holds as soon
        // as any of them is attacked.
        let board = Board::from_rows(&[
            "....k...",
            "........",
            "........",
            "....r...",
            "........",
            "........",
            "K.......",
            "....K...",
        ])
        .unwrap();
        assert!(board.is_in_check(Team::White));
    }

    #[test]
    fn team_without_king_is_never_in_check() {
        let mut board = Board::from_rows(&[
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....P...",
            "........",
        ])
        .unwrap();
        assert!(!board.is_in_check(Team::White));
        assert!(!board.is_checkmate(Team::White));
    }
}
