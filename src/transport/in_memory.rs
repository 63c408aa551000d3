#![cfg(feature = "std")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::{
    check_win, Board, GameState, PlayerId, DEFAULT_COLS, DEFAULT_ROWS, MOVE_TIMEOUT_MS,
    PLAYERS_PER_GAME,
};
use crate::protocol::{GameStateResponse, JoinRole, MoveResponse, TimerResponse};
use crate::transport::LobbyApi;

/// Settings of an in-process lobby server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRules {
    pub rows: usize,
    pub cols: usize,
    pub move_timeout: Duration,
    /// Seed for lobby ids; random when `None`.
    pub seed: Option<u64>,
}

impl Default for ServerRules {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            move_timeout: Duration::from_millis(MOVE_TIMEOUT_MS),
            seed: None,
        }
    }
}

struct Lobby {
    board: Board,
    // Join order decides who moves first.
    players: Vec<(PlayerId, String)>,
    spectators: Vec<(PlayerId, String)>,
    current: Option<PlayerId>,
    deadline: Option<u64>,
    game_over: bool,
    winner: Option<PlayerId>,
    message: Option<String>,
}

impl Lobby {
    fn nickname(&self, id: &PlayerId) -> Option<&str> {
        self.players
            .iter()
            .find(|(p, _)| p == id)
            .map(|(_, n)| n.as_str())
    }

    fn is_player(&self, id: &PlayerId) -> bool {
        self.nickname(id).is_some()
    }

    fn other_player(&self, id: &PlayerId) -> Option<PlayerId> {
        self.players
            .iter()
            .map(|(p, _)| p)
            .find(|p| *p != id)
            .cloned()
    }

    fn snapshot(&self, now: u64) -> GameStateResponse {
        GameStateResponse {
            board: self.board.to_wire(),
            current_player: self.current.as_ref().map(PlayerId::to_string),
            players: self
                .players
                .iter()
                .map(|(p, n)| (p.to_string(), n.clone()))
                .collect(),
            spectators: self
                .spectators
                .iter()
                .map(|(p, n)| (p.to_string(), n.clone()))
                .collect(),
            game_over: self.game_over,
            winner: self.winner.as_ref().map(PlayerId::to_string),
            message: self.message.clone(),
            move_deadline: if self.game_over {
                None
            } else {
                Some(self.deadline.unwrap_or(now))
            },
        }
    }
}

struct LobbyServer {
    rules: ServerRules,
    rng: SmallRng,
    lobbies: HashMap<String, Lobby>,
}

impl LobbyServer {
    fn lobby_mut(&mut self, id: &str) -> anyhow::Result<&mut Lobby> {
        self.lobbies
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("Lobby not found"))
    }

    fn fresh_lobby_id(&mut self) -> String {
        loop {
            let id = self.rng.random_range(100_000..1_000_000u32).to_string();
            if !self.lobbies.contains_key(&id) {
                return id;
            }
        }
    }

    fn deadline_from(&self, now: u64) -> u64 {
        now + self.rules.move_timeout.as_millis() as u64
    }
}

/// Lobby server living in this process. Clones share the same lobbies, so
/// two players in one process can each hold a handle.
#[derive(Clone)]
pub struct InMemoryLobby {
    server: Arc<Mutex<LobbyServer>>,
}

impl Default for InMemoryLobby {
    fn default() -> Self {
        Self::new(ServerRules::default())
    }
}

impl InMemoryLobby {
    pub fn new(rules: ServerRules) -> Self {
        let rng = match rules.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        };
        Self {
            server: Arc::new(Mutex::new(LobbyServer {
                rules,
                rng,
                lobbies: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, LobbyServer>> {
        self.server
            .lock()
            .map_err(|_| anyhow::anyhow!("lobby server state poisoned"))
    }

    /// Raw wire snapshot of `lobby`, as the HTTP server would send it.
    pub fn snapshot(&self, lobby: &str) -> anyhow::Result<GameStateResponse> {
        let mut server = self.lock()?;
        Ok(server.lobby_mut(lobby)?.snapshot(now_ms()))
    }

    fn add_spectator(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<()> {
        let mut server = self.lock()?;
        let game = server.lobby_mut(lobby)?;
        if game.game_over {
            return Err(anyhow::anyhow!("Cannot spectate. The game is already over."));
        }
        if game.is_player(user) {
            return Err(anyhow::anyhow!("You are already a player in this game."));
        }
        game.spectators.push((user.clone(), nickname.to_string()));
        info!("Spectator joined: lobby {}, user {}", lobby, user);
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl LobbyApi for InMemoryLobby {
    async fn create_lobby(&self, user: &PlayerId, nickname: &str) -> anyhow::Result<String> {
        if user.as_str().is_empty() || nickname.is_empty() {
            return Err(anyhow::anyhow!(
                "User ID and nickname are required to create a lobby."
            ));
        }
        let mut server = self.lock()?;
        let board = Board::new(server.rules.rows, server.rules.cols)
            .map_err(|e| anyhow::anyhow!(e))?;
        let id = server.fresh_lobby_id();
        server.lobbies.insert(
            id.clone(),
            Lobby {
                board,
                players: vec![(user.clone(), nickname.to_string())],
                spectators: Vec::new(),
                current: None,
                deadline: None,
                game_over: false,
                winner: None,
                message: None,
            },
        );
        info!("Lobby created with ID: {}", id);
        Ok(id)
    }

    async fn join_lobby(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<JoinRole> {
        let mut server = self.lock()?;
        let deadline = server.deadline_from(now_ms());
        let game = server.lobby_mut(lobby)?;
        if game.game_over {
            return Err(anyhow::anyhow!("Cannot join. The game is already over."));
        }
        if let Some(seat) = game.players.iter_mut().find(|(p, _)| p == user) {
            seat.1 = nickname.to_string();
            return Ok(JoinRole::Player);
        }
        if game.players.len() < PLAYERS_PER_GAME {
            game.players.push((user.clone(), nickname.to_string()));
            if game.players.len() == PLAYERS_PER_GAME {
                game.current = game.players.first().map(|(p, _)| p.clone());
                game.deadline = Some(deadline);
                info!("Game started in lobby {}", lobby);
            }
            info!("Player joined: lobby {}, user {}", lobby, user);
            return Ok(JoinRole::Player);
        }
        game.spectators.push((user.clone(), nickname.to_string()));
        info!("Spectator joined: lobby {}, user {}", lobby, user);
        Ok(JoinRole::Spectator)
    }

    async fn join_as_spectator(
        &self,
        lobby: &str,
        user: &PlayerId,
        nickname: &str,
    ) -> anyhow::Result<()> {
        self.add_spectator(lobby, user, nickname)
    }

    async fn fetch_game_state(&self, lobby: &str) -> anyhow::Result<GameState> {
        let snapshot = self.snapshot(lobby)?;
        GameState::try_from(snapshot).map_err(|e| anyhow::anyhow!(e))
    }

    async fn submit_move(
        &self,
        lobby: &str,
        user: &PlayerId,
        column: usize,
    ) -> anyhow::Result<MoveResponse> {
        let mut server = self.lock()?;
        let deadline = server.deadline_from(now_ms());
        let game = server.lobby_mut(lobby)?;
        if game.game_over {
            return Err(anyhow::anyhow!("Game is over. No moves allowed."));
        }
        if !game.is_player(user) {
            return Err(anyhow::anyhow!(
                "You are a spectator. You cannot make a move."
            ));
        }
        if !game.current.as_ref().is_some_and(|c| c == user) {
            return Err(anyhow::anyhow!("It's not your turn!"));
        }
        if column >= game.board.cols() {
            return Err(anyhow::anyhow!("Invalid column"));
        }
        if !game.board.is_valid_move(column) {
            return Err(anyhow::anyhow!("Column is full"));
        }
        game.board
            .place(column, user.clone())
            .map_err(|e| anyhow::anyhow!(e))?;

        if check_win(&game.board, user) {
            let nick = game.nickname(user).unwrap_or(user.as_str()).to_string();
            game.game_over = true;
            game.winner = Some(user.clone());
            game.message = Some(format!("{} wins!", nick));
            info!("Lobby {}: {} wins", lobby, nick);
        } else if game.board.is_full() {
            game.game_over = true;
            game.message = Some("Draw".to_string());
            info!("Lobby {}: draw", lobby);
        } else {
            game.current = game.other_player(user);
            game.deadline = Some(deadline);
        }

        Ok(MoveResponse {
            board: game.board.to_wire(),
            current_player: game.current.as_ref().map(PlayerId::to_string),
            message: game.message.clone(),
            move_deadline: game.deadline,
        })
    }

    async fn check_timer(&self, lobby: &str) -> anyhow::Result<TimerResponse> {
        let now = now_ms();
        let mut server = self.lock()?;
        let deadline = server.deadline_from(now);
        let game = server.lobby_mut(lobby)?;
        if game.game_over {
            return Ok(TimerResponse {
                message: game.message.clone(),
                ..TimerResponse::default()
            });
        }
        if let (Some(current), Some(expiry)) = (game.current.clone(), game.deadline) {
            if now > expiry {
                game.current = game.other_player(&current);
                game.deadline = Some(deadline);
                info!("Lobby {}: turn switched due to timeout", lobby);
            }
        }
        Ok(TimerResponse {
            board: Some(game.board.to_wire()),
            current_player: game.current.as_ref().map(PlayerId::to_string),
            move_deadline: game.deadline,
            message: None,
        })
    }
}
