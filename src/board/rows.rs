//! # Row-string board format
//!
//! A board is loaded from a sequence of equal-length strings, one per row,
//! row 0 being team 1's back rank. `.` marks an empty cell; the letters
//! `P R N B Q K` mark team 0 pieces and their lowercase equivalents team 1.
use thiserror::Error;

use super::{
    piece::{Piece, PieceKind},
    team::Team,
};

/// Row-format parsing errors.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum RowsError {
    #[error("no rows given")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown piece letter {letter:?} at row {row}, column {column}")]
    UnknownLetter {
        letter: char,
        row: usize,
        column: usize,
    },
}

/// Parses a row list into grid dimensions and cell contents, in
/// `y * width + x` order.
///
/// Every parsed piece starts with a move count of zero.
pub(crate) fn parse(rows: &[&str]) -> Result<(usize, usize, Vec<Option<Piece>>), RowsError> {
    let height = rows.len();
    if height == 0 {
        return Err(RowsError::Empty);
    }
    let width = rows[0].chars().count();
    if width == 0 {
        return Err(RowsError::Empty);
    }

    let mut cells = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != width {
            return Err(RowsError::RaggedRow {
                row: y,
                len,
                expected: width,
            });
        }
        for (x, letter) in row.chars().enumerate() {
            cells.push(cell_from_letter(letter).map_err(|letter| RowsError::UnknownLetter {
                letter,
                row: y,
                column: x,
            })?);
        }
    }
    Ok((width, height, cells))
}

/// Serializes cell contents back into the row list they were loaded from.
pub(crate) fn serialize(width: usize, cells: &[Option<Piece>]) -> Vec<String> {
    cells
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or('.', Piece::letter))
                .collect()
        })
        .collect()
}

fn cell_from_letter(letter: char) -> Result<Option<Piece>, char> {
    if letter == '.' {
        return Ok(None);
    }
    let team = if letter.is_ascii_lowercase() {
        Team::Black
    } else {
        Team::White
    };
    let kind = PieceKind::from_letter(letter.to_ascii_uppercase()).ok_or(letter)?;
    Ok(Some(Piece::new(kind, team)))
}
