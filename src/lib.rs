#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
pub mod player;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod poll;
#[cfg(feature = "std")]
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use crate::core::*;
pub use player::{AiPlayer, Player};

#[cfg(feature = "std")]
pub use config::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use player::{CliPlayer, PlayerNode};
#[cfg(feature = "std")]
pub use poll::{CancelHandle, PollPolicy, Poller, Snapshot};
#[cfg(feature = "std")]
pub use session::{generate_user_id, Session};
#[cfg(feature = "std")]
pub use transport::{http::HttpLobby, in_memory::InMemoryLobby, in_memory::ServerRules, LobbyApi};
