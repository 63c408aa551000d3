//! Core four-in-a-row engine (no_std compatible)
//!
//! Board model, win detection, one-ply move simulation and move selection.
//! Everything here is a pure function of the board it is given; the only
//! dependency is `alloc`, so it builds without the `std` feature.

pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod simulate;
pub mod strategy;
pub mod win;

// Re-export commonly used types
pub use board::Board;
pub use common::{BoardError, Cell, PlayerId};
pub use config::*;
pub use game::{GameState, Outcome, Phase};
pub use simulate::simulate;
pub use strategy::{
    first_available, select_move, winning_column, Decision, FirstAvailable, MoveStrategy,
    StrategyKind, Tier, UnknownStrategy, WinBlock,
};
pub use win::{check_win, check_win_with_target, find_alignment, Alignment, Direction};
