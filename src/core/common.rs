//! Common types for the engine: player identifiers, cells and board errors.

use alloc::string::String;
use core::fmt;

use super::config::EMPTY_CELL;

/// Opaque token identifying one connected participant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Taken(PlayerId),
}

impl Cell {
    /// Parse a cell as the lobby server encodes it. Blank strings are empty.
    pub fn from_wire(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Taken(PlayerId::new(raw))
        }
    }

    /// Encode the cell the way the lobby server stores it.
    pub fn to_wire(&self) -> String {
        match self {
            Cell::Empty => String::from(EMPTY_CELL),
            Cell::Taken(id) => id.0.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<&PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Taken(id) => Some(id),
        }
    }

    pub fn is_owned_by(&self, player: &PlayerId) -> bool {
        self.owner() == Some(player)
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Column index outside `0..cols`.
    InvalidColumn { col: usize, cols: usize },
    /// Column has no empty cell left.
    ColumnFull(usize),
    /// A row's length differs from the first row.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Board has no rows or no columns.
    EmptyBoard,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidColumn { col, cols } => {
                write!(f, "Column {} is out of range (board has {} columns)", col, cols)
            }
            BoardError::ColumnFull(col) => write!(f, "Column {} is full", col),
            BoardError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row, found, expected
            ),
            BoardError::EmptyBoard => write!(f, "Board has no cells"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
