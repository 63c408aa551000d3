//! Lobby server access.
//!
//! [`LobbyApi`] is the seam between the game loop and the server. The HTTP
//! implementation talks to a real lobby server; the in-memory one runs the
//! same rules in-process for local games and tests.

use crate::core::{GameState, PlayerId};
use crate::protocol::{JoinRole, MoveResponse, TimerResponse};

#[async_trait::async_trait]
pub trait LobbyApi: Send + Sync {
    /// Open a new lobby with `user` as its first player. Returns the lobby id.
    async fn create_lobby(&self, user: &PlayerId, nickname: &str) -> anyhow::Result<String>;

    /// Take a seat in `lobby`, or a spectator slot once both seats are taken.
    async fn join_lobby(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<JoinRole>;

    /// Watch `lobby` without playing.
    async fn join_as_spectator(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<()>;

    async fn fetch_game_state(&self, lobby: &str) -> anyhow::Result<GameState>;

    /// Drop `user`'s token into `column`. Rejected moves come back as errors
    /// carrying the server's message.
    async fn submit_move(
        &self,
        lobby: &str,
        user: &PlayerId,
        column: usize,
    ) -> anyhow::Result<MoveResponse>;

    /// Ask the server to pass the turn if the current player timed out.
    async fn check_timer(&self, lobby: &str) -> anyhow::Result<TimerResponse>;
}

pub mod http;
pub mod in_memory;
