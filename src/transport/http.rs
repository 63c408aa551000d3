#![cfg(feature = "std")]

use anyhow::Context;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::core::{GameState, PlayerId};
use crate::protocol::{
    routes, CreateLobbyRequest, CreateLobbyResponse, ErrorResponse, GameStateResponse,
    JoinLobbyRequest, JoinLobbyResponse, JoinRole, MoveRequest, MoveResponse, TimerResponse,
};
use crate::transport::LobbyApi;

/// Lobby client speaking JSON over HTTP.
pub struct HttpLobby {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpLobby {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get<R: DeserializeOwned>(&self, route: &str) -> anyhow::Result<R> {
        let url = self.config.endpoint(route);
        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;
        Self::decode(resp).await
    }

    async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        route: &str,
        body: &B,
    ) -> anyhow::Result<R> {
        let url = self.config.endpoint(route);
        debug!("POST {}", url);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;
        Self::decode(resp).await
    }

    /// Parse a success body as `R`, or turn an error body into an error
    /// carrying the server's message.
    async fn decode<R: DeserializeOwned>(resp: reqwest::Response) -> anyhow::Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await.context("failed to read response body")?;
        if status.is_success() {
            return serde_json::from_slice(&bytes)
                .with_context(|| format!("malformed response body (status {})", status));
        }
        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(err) => Err(anyhow::anyhow!(err.error)),
            Err(_) => Err(anyhow::anyhow!("Server responded with status {}", status)),
        }
    }
}

#[async_trait::async_trait]
impl LobbyApi for HttpLobby {
    async fn create_lobby(&self, user: &PlayerId, nickname: &str) -> anyhow::Result<String> {
        let req = CreateLobbyRequest {
            user_id: user.to_string(),
            nickname: nickname.to_string(),
        };
        let resp: CreateLobbyResponse = self.post(routes::CREATE_LOBBY, &req).await?;
        info!("Lobby {} created by {}", resp.lobby_id, user);
        Ok(resp.lobby_id)
    }

    async fn join_lobby(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<JoinRole> {
        let req = JoinLobbyRequest {
            lobby: lobby.to_string(),
            user_id: user.to_string(),
            nickname: nickname.to_string(),
        };
        let resp: JoinLobbyResponse = self.post(routes::JOIN_LOBBY, &req).await?;
        info!("{} joined lobby {}: {}", user, resp.lobby_id, resp.message);
        Ok(resp.role())
    }

    async fn join_as_spectator(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<()> {
        let req = JoinLobbyRequest {
            lobby: lobby.to_string(),
            user_id: user.to_string(),
            nickname: nickname.to_string(),
        };
        let resp: JoinLobbyResponse = self.post(routes::ADD_SPECTATOR, &req).await?;
        info!("{} spectating lobby {}", user, resp.lobby_id);
        Ok(())
    }

    async fn fetch_game_state(&self, lobby: &str) -> anyhow::Result<GameState> {
        let route = format!("{}/{}", routes::GAME_STATE, lobby);
        let resp: GameStateResponse = self.get(&route).await?;
        GameState::try_from(resp).map_err(|e| anyhow::anyhow!("invalid board in game state: {}", e))
    }

    async fn submit_move(
        &self,
        lobby: &str,
        user: &PlayerId,
        column: usize,
    ) -> anyhow::Result<MoveResponse> {
        let req = MoveRequest {
            lobby: lobby.to_string(),
            user_id: user.to_string(),
            cell: column,
        };
        self.post(routes::MAKE_MOVE, &req).await
    }

    async fn check_timer(&self, lobby: &str) -> anyhow::Result<TimerResponse> {
        let route = format!("{}/{}", routes::CHECK_TIMER, lobby);
        self.get(&route).await
    }
}
