//! One-ply move simulation.

use super::board::Board;
use super::common::{BoardError, PlayerId};

/// Board that results from `player` dropping a token into `col`.
///
/// The input board is left untouched; the returned board is an independent
/// copy differing from it in exactly one cell. Callers should check
/// [`Board::is_valid_move`] first: a full or out-of-range column is an error.
pub fn simulate(board: &Board, col: usize, player: &PlayerId) -> Result<Board, BoardError> {
    let mut next = board.clone();
    next.place(col, player.clone())?;
    Ok(next)
}
