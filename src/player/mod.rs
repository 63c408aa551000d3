//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - AiPlayer: delegates to a pluggable move strategy
//! - CliPlayer: interactive command-line player
//! - PlayerNode: runs a player against a lobby until the game ends

use crate::core::{GameState, PlayerId};

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Choose a column to drop into, or `None` when no move can be made.
    fn choose_column(&mut self, state: &GameState, me: &PlayerId) -> Option<usize>;

    /// Inform the player whether the server accepted its last move.
    fn handle_move_result(&mut self, _column: usize, _accepted: bool) {}
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;

#[cfg(feature = "std")]
pub mod node;
#[cfg(feature = "std")]
pub use node::PlayerNode;
