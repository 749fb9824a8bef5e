//! # Piece rules
//!
//! Per-piece-kind generation of pseudo-legal target cells and attack
//! cells, and resolution of a chosen target into the concrete action list
//! real play applies (plain moves, captures, castling, en passant,
//! promotion).
//!
//! Everything here is pure over a board snapshot, with one exception:
//! validating a castle target probes the transit cells for check via the
//! board's make-test-unmake primitive, which mutates and restores the
//! board within the call. Attack-cell generation never does this (a
//! king's castle targets are not attacks), which is what keeps the check
//! query free of infinite recursion.
use super::{
    action::{Action, CompoundMove},
    cell::{team_rank, CellIndex, Coords, Delta},
    piece::{Piece, PieceKind},
    position::Board,
    team::Team,
};

/// Pseudo-legal target cells of the piece on `origin`; king safety is not
/// considered. Empty when the cell holds no piece.
pub(crate) fn candidate_targets(board: &mut Board, origin: CellIndex) -> Vec<CellIndex> {
    let Some(piece) = board.piece(origin) else {
        return Vec::new();
    };
    let at = board.coords(origin);
    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, at, piece.team),
        PieceKind::Rook => slider_targets(board, at, piece.team, &Delta::ORTHOGONAL),
        PieceKind::Bishop => slider_targets(board, at, piece.team, &Delta::DIAGONAL),
        PieceKind::Queen => slider_targets(board, at, piece.team, &Delta::QUEEN_DELTAS),
        PieceKind::Knight => knight_targets(board, at, piece.team),
        PieceKind::King => {
            let mut targets = step_targets(board, at, piece.team);
            targets.extend(castle_targets(board, origin, piece));
            targets
        }
    }
}

/// The cells the piece on `origin` threatens to capture on. Subset of its
/// candidate targets, used only for check detection.
///
/// Differences from candidate generation: a pawn's forward pushes are not
/// attacks (and its diagonals are, exactly when an opponent stands
/// there), and a king's castle targets are excluded.
pub(crate) fn attack_cells(board: &Board, origin: CellIndex) -> Vec<CellIndex> {
    let Some(piece) = board.piece(origin) else {
        return Vec::new();
    };
    let at = board.coords(origin);
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(board, at, piece.team),
        PieceKind::Rook => slider_targets(board, at, piece.team, &Delta::ORTHOGONAL),
        PieceKind::Bishop => slider_targets(board, at, piece.team, &Delta::DIAGONAL),
        PieceKind::Queen => slider_targets(board, at, piece.team, &Delta::QUEEN_DELTAS),
        PieceKind::Knight => knight_targets(board, at, piece.team),
        PieceKind::King => step_targets(board, at, piece.team),
    }
}

/// Resolves the chosen move `from -> to` into the ordered actions that
/// perform it, special moves included. The target is assumed to be one of
/// the origin piece's candidate targets.
pub(crate) fn resolve_target(board: &mut Board, from: CellIndex, to: CellIndex) -> CompoundMove {
    let Some(piece) = board.piece(from) else {
        return CompoundMove::new();
    };
    match piece.kind {
        PieceKind::King if is_castle_target(board, from, to) => castle_actions(board, from, to),
        PieceKind::Pawn => pawn_actions(board, from, to, piece),
        _ => move_actions(board, from, to),
    }
}

fn max_ray_distance(board: &Board) -> usize {
    board.width().max(board.height())
}

/// Keeps a ray's cells up to and including the first opponent piece;
/// a terminal friendly piece is dropped.
fn slider_targets(
    board: &Board,
    at: Coords,
    team: Team,
    directions: &[Delta],
) -> Vec<CellIndex> {
    let distance = max_ray_distance(board);
    let mut targets = Vec::new();
    for &delta in directions {
        targets.extend(
            board
                .cast_ray(at, delta, distance)
                .into_iter()
                .filter(|&index| board.is_empty(index) || board.has_opponent(index, team)),
        );
    }
    targets
}

fn knight_targets(board: &Board, at: Coords, team: Team) -> Vec<CellIndex> {
    Delta::KNIGHT_DELTAS
        .iter()
        .filter_map(|&delta| board.cell_index(at + delta))
        .filter(|&index| board.is_empty(index) || board.has_opponent(index, team))
        .collect()
}

/// Distance-1 steps in the eight directions; used by the king.
fn step_targets(board: &Board, at: Coords, team: Team) -> Vec<CellIndex> {
    let mut targets = Vec::new();
    for &delta in &Delta::QUEEN_DELTAS {
        targets.extend(
            board
                .cast_ray(at, delta, 1)
                .into_iter()
                .filter(|&index| board.is_empty(index) || board.has_opponent(index, team)),
        );
    }
    targets
}

fn pawn_targets(board: &Board, at: Coords, team: Team) -> Vec<CellIndex> {
    let mut targets = Vec::new();
    let forward = Delta::forward(team);

    // Forward pushes: two cells from the starting rank, one otherwise.
    // The inclusive ray terminal makes obstruction fall out of the
    // emptiness filter.
    let distance = if team_rank(team, at.y, board.height() as i16) == 2 {
        2
    } else {
        1
    };
    targets.extend(
        board
            .cast_ray(at, forward, distance)
            .into_iter()
            .filter(|&index| board.is_empty(index)),
    );

    // Diagonal captures.
    targets.extend(pawn_attacks(board, at, team));

    if let Some(target) = en_passant_target(board, at, team) {
        targets.push(target);
    }
    targets
}

fn pawn_attacks(board: &Board, at: Coords, team: Team) -> Vec<CellIndex> {
    let forward = Delta::forward(team);
    [Delta::new(-1, forward.dy), Delta::new(1, forward.dy)]
        .into_iter()
        .filter_map(|delta| board.cell_index(at + delta))
        .filter(|&index| board.has_opponent(index, team))
        .collect()
}

/// The en passant target cell of the pawn at `at`, if the position allows
/// one right now.
///
/// Only the single most recent history entry decides this: it must be a
/// Move of an opponent pawn with post-move move count exactly 1, standing
/// on the rank a two-step opening advance reaches, laterally adjacent to
/// the capturing pawn. The target is the cell directly behind that pawn
/// along the capturer's forward direction.
fn en_passant_target(board: &Board, at: Coords, team: Team) -> Option<CellIndex> {
    let &Action::Move { to, piece, .. } = board.history().last()? else {
        return None;
    };
    if piece.team == team || piece.kind != PieceKind::Pawn || piece.move_count != 1 {
        return None;
    }
    let moved_at = board.coords(to);
    // A first move ending on the fourth own rank can only have been the
    // two-step advance.
    if team_rank(piece.team, moved_at.y, board.height() as i16) != 4 {
        return None;
    }
    if (moved_at.x - at.x).abs() != 1 || moved_at.y != at.y {
        return None;
    }
    board.cell_index(moved_at + Delta::forward(team))
}

/// A plain relocation, with the capture half when the target is occupied
/// by an opponent.
fn move_actions(board: &Board, from: CellIndex, to: CellIndex) -> CompoundMove {
    let mut actions = CompoundMove::new();
    let Some(piece) = board.piece(from) else {
        return actions;
    };
    // Capacity 4 covers the two actions pushed here.
    unsafe {
        if let Some(occupant) = board.piece(to) {
            actions.push_unchecked(Action::Remove {
                cell: to,
                piece: occupant,
            });
        }
        actions.push_unchecked(Action::Move {
            from,
            to,
            piece: Piece {
                move_count: piece.move_count + 1,
                ..piece
            },
        });
    }
    actions
}

/// Pawn resolution: en passant when the target is the en passant cell,
/// otherwise a plain move/capture, with the promotion pair appended when
/// the destination reaches the eighth own rank.
fn pawn_actions(board: &Board, from: CellIndex, to: CellIndex, piece: Piece) -> CompoundMove {
    let at = board.coords(from);
    if en_passant_target(board, at, piece.team) == Some(to) {
        return en_passant_actions(board, from, to, piece);
    }

    let mut actions = move_actions(board, from, to);
    let destination = board.coords(to);
    if team_rank(piece.team, destination.y, board.height() as i16) == 8 {
        // The pawn that just moved makes way for a queen. Automatic: no
        // underpromotion choice is modeled.
        unsafe {
            actions.push_unchecked(Action::Remove {
                cell: to,
                piece: Piece {
                    move_count: piece.move_count + 1,
                    ..piece
                },
            });
            actions.push_unchecked(Action::Add {
                cell: to,
                piece: Piece::new(PieceKind::Queen, piece.team),
            });
        }
    }
    actions
}

/// En passant: the captured pawn stands beside the capturer, one rank
/// behind the target cell, and is removed from its own cell.
fn en_passant_actions(
    board: &Board,
    from: CellIndex,
    to: CellIndex,
    piece: Piece,
) -> CompoundMove {
    let from_at = board.coords(from);
    let to_at = board.coords(to);
    let captured_cell = board.index_of(Coords::new(to_at.x, from_at.y));

    let mut actions = CompoundMove::new();
    unsafe {
        if let Some(captured) = board.piece(captured_cell) {
            actions.push_unchecked(Action::Remove {
                cell: captured_cell,
                piece: captured,
            });
        }
        actions.push_unchecked(Action::Move {
            from,
            to,
            piece: Piece {
                move_count: piece.move_count + 1,
                ..piece
            },
        });
    }
    actions
}

/// The friendly rook cells the king on `king_cell` may castle with right
/// now. The king selects the rook's own cell as its move target.
fn castle_targets(board: &mut Board, king_cell: CellIndex, king: Piece) -> Vec<CellIndex> {
    if king.move_count != 0 {
        return Vec::new();
    }
    let rooks: Vec<CellIndex> = board
        .pieces()
        .filter(|(_, piece)| {
            piece.team == king.team && piece.kind == PieceKind::Rook && piece.move_count == 0
        })
        .map(|(index, _)| index)
        .collect();
    rooks
        .into_iter()
        .filter(|&rook_cell| is_castle_target(board, king_cell, rook_cell))
        .collect()
}

/// Full castle validation: untouched king and rook sharing a row, an
/// empty corridor between them, and no check on the king's current cell,
/// its transit cell or its destination.
fn is_castle_target(board: &mut Board, king_cell: CellIndex, target: CellIndex) -> bool {
    let Some(king) = board.piece(king_cell) else {
        return false;
    };
    if king.kind != PieceKind::King || king.move_count != 0 {
        return false;
    }
    let Some(rook) = board.piece(target) else {
        return false;
    };
    if rook.kind != PieceKind::Rook || rook.team != king.team || rook.move_count != 0 {
        return false;
    }

    let king_at = board.coords(king_cell);
    let rook_at = board.coords(target);
    if king_at.y != rook_at.y {
        return false;
    }

    // The ray towards the rook stops at the first occupied cell; reaching
    // the rook's cell means the corridor is empty.
    let towards_rook = Delta::new((rook_at.x - king_at.x).signum() as i8, 0);
    let ray = board.cast_ray(king_at, towards_rook, max_ray_distance(board));
    if !ray.contains(&target) || ray.len() < 2 {
        return false;
    }

    // Castling out of, through, or into check is not allowed.
    if board.is_in_check(king.team) {
        return false;
    }
    ray[..2]
        .iter()
        .all(|&transit| !board.step_puts_king_in_check(king_cell, transit, king.team))
}

/// Castle resolution: the rook lands next to the king's destination, the
/// king two cells towards the rook. Rook action first.
fn castle_actions(board: &Board, king_cell: CellIndex, rook_cell: CellIndex) -> CompoundMove {
    let mut actions = CompoundMove::new();
    let (Some(king), Some(rook)) = (board.piece(king_cell), board.piece(rook_cell)) else {
        return actions;
    };

    let king_at = board.coords(king_cell);
    let rook_at = board.coords(rook_cell);
    let side = (rook_at.x - king_at.x).signum();
    let rook_to = board.index_of(Coords::new(king_at.x + side, king_at.y));
    let king_to = board.index_of(Coords::new(king_at.x + 2 * side, king_at.y));

    unsafe {
        actions.push_unchecked(Action::Move {
            from: rook_cell,
            to: rook_to,
            piece: Piece {
                move_count: rook.move_count + 1,
                ..rook
            },
        });
        actions.push_unchecked(Action::Move {
            from: king_cell,
            to: king_to,
            piece: Piece {
                move_count: king.move_count + 1,
                ..king
            },
        });
    }
    actions
}
