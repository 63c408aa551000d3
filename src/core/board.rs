//! Board model: a `rows x cols` grid with column-drop semantics.
//!
//! Row 0 is the top of the board. A token dropped into a column lands in the
//! lowest empty cell of that column. Dimensions come from whatever state the
//! board was built from; nothing here assumes a fixed size.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::common::{BoardError, Cell, PlayerId};

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// Build a board from rows of cells, top row first.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(BoardError::RaggedRows {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: height,
            cols,
            cells,
        })
    }

    /// Build a board from the string grid the lobby server sends.
    pub fn from_wire<R: AsRef<[S]>, S: AsRef<str>>(grid: &[R]) -> Result<Self, BoardError> {
        let rows: Vec<Vec<Cell>> = grid
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|c| Cell::from_wire(c.as_ref()))
                    .collect::<Vec<_>>()
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Encode the board as the lobby server's string grid.
    pub fn to_wire(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(Cell::to_wire).collect())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (`row`, `col`), or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Whether the cell at (`row`, `col`) belongs to `player`.
    pub fn is_owned_by(&self, row: usize, col: usize, player: &PlayerId) -> bool {
        self.get(row, col).is_some_and(|c| c.is_owned_by(player))
    }

    /// `true` iff `col` is on the board and its top cell is empty.
    pub fn is_valid_move(&self, col: usize) -> bool {
        self.get(0, col).is_some_and(Cell::is_empty)
    }

    /// Row a token dropped into `col` would land in.
    pub fn drop_position(&self, col: usize) -> Result<usize, BoardError> {
        self.check_column(col)?;
        (0..self.rows)
            .rev()
            .find(|&r| self.cells[r * self.cols + col].is_empty())
            .ok_or(BoardError::ColumnFull(col))
    }

    /// Drop `player`'s token into `col`, returning the row it landed in.
    pub fn place(&mut self, col: usize, player: PlayerId) -> Result<usize, BoardError> {
        let row = self.drop_position(col)?;
        self.cells[row * self.cols + col] = Cell::Taken(player);
        Ok(row)
    }

    /// Columns that still accept a token, left to right.
    pub fn valid_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&c| self.is_valid_move(c))
    }

    /// `true` when no column accepts another token.
    pub fn is_full(&self) -> bool {
        self.valid_columns().next().is_none()
    }

    /// Number of empty cells left on the board.
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    fn check_column(&self, col: usize) -> Result<(), BoardError> {
        if col >= self.cols {
            return Err(BoardError::InvalidColumn {
                col,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.rows, self.cols)?;
        for row in self.cells.chunks(self.cols) {
            f.write_str("  ")?;
            for cell in row {
                match cell {
                    Cell::Empty => f.write_str(" .")?,
                    Cell::Taken(id) => write!(f, " {}", id)?,
                }
            }
            writeln!(f)?;
        }
        f.write_str("}")
    }
}
