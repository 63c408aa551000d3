#![cfg(feature = "std")]
//! JSON bodies exchanged with the lobby server.
//!
//! Field names follow the server's camelCase. Cells travel as strings, with
//! `" "` marking an empty cell; conversion to [`GameState`] validates the
//! board shape so the engine never sees a ragged grid.

use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::core::{Board, BoardError, GameState, PlayerId};

pub mod routes {
    pub const CREATE_LOBBY: &str = "create-lobby";
    pub const JOIN_LOBBY: &str = "join-lobby";
    pub const ADD_SPECTATOR: &str = "add-spectator";
    pub const MAKE_MOVE: &str = "make-a-move";
    pub const GAME_STATE: &str = "game-state";
    pub const CHECK_TIMER: &str = "check-timer";
}

/// Wire representation of a board: rows of cell strings, top row first.
pub type WireBoard = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyRequest {
    pub user_id: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyResponse {
    pub lobby_id: String,
}

/// Body of both `join-lobby` and `add-spectator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLobbyRequest {
    pub lobby: String,
    pub user_id: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLobbyResponse {
    #[serde(default)]
    pub message: String,
    pub lobby_id: String,
}

pub const JOINED_AS_PLAYER: &str = "Joined as player";
pub const JOINED_AS_SPECTATOR: &str = "Joined as spectator";

/// Seat a participant got when joining a lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRole {
    Player,
    Spectator,
}

impl JoinLobbyResponse {
    pub fn role(&self) -> JoinRole {
        if self.message == JOINED_AS_SPECTATOR {
            JoinRole::Spectator
        } else {
            JoinRole::Player
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub lobby: String,
    pub user_id: String,
    /// Column index; the server calls it `cell`.
    pub cell: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub board: WireBoard,
    pub current_player: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub move_deadline: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerResponse {
    #[serde(default)]
    pub board: Option<WireBoard>,
    #[serde(default)]
    pub current_player: Option<String>,
    #[serde(default)]
    pub move_deadline: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub board: WireBoard,
    #[serde(default)]
    pub current_player: Option<String>,
    #[serde(default)]
    pub players: BTreeMap<String, String>,
    #[serde(default)]
    pub spectators: BTreeMap<String, String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub move_deadline: Option<u64>,
}

impl TryFrom<GameStateResponse> for GameState {
    type Error = BoardError;

    fn try_from(resp: GameStateResponse) -> Result<Self, Self::Error> {
        let board = Board::from_wire(&resp.board)?;
        Ok(GameState {
            board,
            players: resp
                .players
                .into_iter()
                .map(|(id, nick)| (PlayerId::from(id), nick))
                .collect(),
            current_player: resp.current_player.map(PlayerId::from),
            game_over: resp.game_over,
            winner: resp.winner.map(PlayerId::from),
            message: resp.message,
        })
    }
}
