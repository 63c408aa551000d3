//! Win detection: straight runs of `target` tokens owned by one player.

use super::board::Board;
use super::common::PlayerId;
use super::config::WIN_TARGET;

/// Direction of an alignment, named by how it walks across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along a row, left to right.
    Horizontal,
    /// Down a column, top to bottom.
    Vertical,
    /// Down and to the right: `(r+i, c+i)`.
    DiagonalDown,
    /// Up and to the right: `(r+target-1-i, c+i)`.
    DiagonalUp,
}

/// A run of `len` cells found on a board.
///
/// `row`/`col` is the corner of the scanned window: the first cell for
/// horizontal, vertical and down-diagonal runs, the top-left of the
/// bounding box for up-diagonal runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub row: usize,
    pub col: usize,
    pub len: usize,
    pub direction: Direction,
}

impl Alignment {
    /// Coordinates covered by the run, in scan order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Alignment {
            row,
            col,
            len,
            direction,
        } = *self;
        (0..len).map(move |i| match direction {
            Direction::Horizontal => (row, col + i),
            Direction::Vertical => (row + i, col),
            Direction::DiagonalDown => (row + i, col + i),
            Direction::DiagonalUp => (row + len - 1 - i, col + i),
        })
    }
}

/// `true` iff `player` owns four aligned cells anywhere on `board`.
pub fn check_win(board: &Board, player: &PlayerId) -> bool {
    find_alignment(board, player, WIN_TARGET).is_some()
}

/// Like [`check_win`] with a custom run length.
pub fn check_win_with_target(board: &Board, player: &PlayerId, target: usize) -> bool {
    find_alignment(board, player, target).is_some()
}

/// First run of `target` cells owned by `player`, scanning rows, then
/// columns, then both diagonals. Stops at the first match.
pub fn find_alignment(board: &Board, player: &PlayerId, target: usize) -> Option<Alignment> {
    if target == 0 {
        return None;
    }
    let rows = board.rows();
    let cols = board.cols();
    let owned = |a: &Alignment| a.cells().all(|(r, c)| board.is_owned_by(r, c, player));
    let run = |row, col, direction| Alignment {
        row,
        col,
        len: target,
        direction,
    };

    // Last valid start index along each axis; `None` when the board is too
    // small for a run in that direction.
    let last_row = rows.checked_sub(target);
    let last_col = cols.checked_sub(target);

    if let Some(last_col) = last_col {
        for r in 0..rows {
            for c in 0..=last_col {
                let a = run(r, c, Direction::Horizontal);
                if owned(&a) {
                    return Some(a);
                }
            }
        }
    }
    if let Some(last_row) = last_row {
        for c in 0..cols {
            for r in 0..=last_row {
                let a = run(r, c, Direction::Vertical);
                if owned(&a) {
                    return Some(a);
                }
            }
        }
    }
    if let (Some(last_row), Some(last_col)) = (last_row, last_col) {
        for r in 0..=last_row {
            for c in 0..=last_col {
                for direction in [Direction::DiagonalDown, Direction::DiagonalUp] {
                    let a = run(r, c, direction);
                    if owned(&a) {
                        return Some(a);
                    }
                }
            }
        }
    }
    None
}
