//! Commonly used types and utilities for ease of import.

pub use crate::{
    check_win, select_move, simulate, AiPlayer, Board, GameState, MoveStrategy, Outcome, Player,
    PlayerId, StrategyKind,
};

#[cfg(feature = "std")]
pub use crate::{ClientConfig, CliPlayer, PlayerNode, PollPolicy, Session};

#[cfg(feature = "std")]
pub use crate::transport::{http::HttpLobby, in_memory::InMemoryLobby, in_memory::ServerRules, LobbyApi};
