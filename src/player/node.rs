#![cfg(feature = "std")]

use std::boxed::Box;

use log::{info, warn};

use crate::{
    core::{GameState, Outcome, Phase},
    player::Player,
    poll::{CancelHandle, PollPolicy, Poller},
    protocol::JoinRole,
    session::Session,
    transport::LobbyApi,
    ui,
};

/// Runs one player through a lobby: joining, waiting, moving on its turn,
/// until the server reports the game over.
pub struct PlayerNode {
    player: Box<dyn Player>,
    session: Session,
    api: Box<dyn LobbyApi>,
    poller: Poller,
    display: bool,
    moves: usize,
}

impl PlayerNode {
    pub fn new(
        player: Box<dyn Player>,
        session: Session,
        api: Box<dyn LobbyApi>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            player,
            session,
            api,
            poller: Poller::new(policy),
            display: false,
            moves: 0,
        }
    }

    /// Print boards and turn banners to stdout while running.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of moves the server accepted from this node.
    pub fn moves_made(&self) -> usize {
        self.moves
    }

    /// Handle that stops the polling loop from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.poller.cancel_handle()
    }

    /// Open a new lobby and sit in it as the first player.
    pub async fn create_lobby(&mut self) -> anyhow::Result<String> {
        let lobby = self
            .api
            .create_lobby(self.session.user_id(), self.session.nickname())
            .await?;
        self.session.enter_lobby(&lobby)?;
        Ok(lobby)
    }

    /// Join an existing lobby. A full lobby seats us as a spectator, which
    /// the caller has to handle.
    pub async fn join_lobby(&mut self, lobby: &str) -> anyhow::Result<JoinRole> {
        self.session.enter_lobby(lobby)?;
        let role = self
            .api
            .join_lobby(lobby, self.session.user_id(), self.session.nickname())
            .await?;
        if role == JoinRole::Spectator {
            warn!("Lobby {} is full, joined as spectator", lobby);
        }
        Ok(role)
    }

    /// Join `lobby` as a spectator only.
    pub async fn spectate_lobby(&mut self, lobby: &str) -> anyhow::Result<()> {
        self.session.enter_lobby(lobby)?;
        self.api
            .join_as_spectator(lobby, self.session.user_id(), self.session.nickname())
            .await
    }

    /// Poll until a second player has joined.
    pub async fn wait_for_opponent(&mut self) -> anyhow::Result<GameState> {
        let lobby = self.session.require_lobby()?.to_string();
        let mut announced = false;
        loop {
            let snapshot = self.poller.next(self.api.as_ref(), &lobby).await?;
            if snapshot.state.is_ready() || snapshot.state.game_over {
                if self.display {
                    std::println!("Both players are ready. Starting game...");
                }
                return Ok(snapshot.state);
            }
            if !announced {
                announced = true;
                if self.display {
                    std::println!("Waiting for another player to join...");
                }
                info!("Lobby {}: waiting for a second player", lobby);
            }
        }
    }

    /// Play until the game is over and report how it ended.
    pub async fn run(&mut self) -> anyhow::Result<Outcome> {
        let lobby = self.session.require_lobby()?.to_string();
        let me = self.session.user_id().clone();
        loop {
            let snapshot = self.poller.next(self.api.as_ref(), &lobby).await?;
            let state = snapshot.state;
            // Some servers never close a full board; nobody can move, so it is a draw.
            if !state.game_over && state.is_ready() && state.board.is_full() {
                warn!("Lobby {}: board is full but the game is still open", lobby);
                return Ok(self.finish(&lobby, &state, Outcome::Draw));
            }
            match state.phase(&me) {
                Phase::Over => {
                    let outcome = state
                        .outcome_for(&me)
                        .unwrap_or_else(|| Outcome::Ended("Game ended.".to_string()));
                    return Ok(self.finish(&lobby, &state, outcome));
                }
                Phase::WaitingForPlayers => {
                    if snapshot.changed && self.display {
                        std::println!("Waiting for another player to join...");
                    }
                }
                Phase::MyTurn => {
                    if self.display {
                        ui::print_your_turn();
                    }
                    let Some(column) = self.player.choose_column(&state, &me) else {
                        warn!("Lobby {}: no valid moves available", lobby);
                        continue;
                    };
                    match self.api.submit_move(&lobby, &me, column).await {
                        Ok(_) => {
                            self.moves += 1;
                            info!("Lobby {}: {} played column {}", lobby, me, column);
                            self.player.handle_move_result(column, true);
                            self.poller.poll_now();
                        }
                        Err(e) => {
                            warn!("Lobby {}: move to column {} failed: {}", lobby, column, e);
                            if self.display {
                                std::println!("Move failed: {}", e);
                            }
                            self.player.handle_move_result(column, false);
                        }
                    }
                }
                Phase::OpponentTurn => {
                    if snapshot.changed {
                        if self.display {
                            let waiting_on = state
                                .current_player
                                .as_ref()
                                .and_then(|id| state.nickname(id))
                                .unwrap_or("opponent");
                            std::println!("Waiting for {} to play...", waiting_on);
                        }
                    } else if let Err(e) = self.api.check_timer(&lobby).await {
                        warn!("Lobby {}: timer check failed: {}", lobby, e);
                    }
                }
            }
        }
    }

    fn finish(&self, lobby: &str, state: &GameState, outcome: Outcome) -> Outcome {
        let me = self.session.user_id();
        if self.display {
            ui::print_game_over(state, me, &outcome);
        }
        info!("Lobby {}: game over for {} ({:?})", lobby, me, outcome);
        outcome
    }

    /// Watch the lobby, printing the board whenever it changes, until the
    /// game is over. Returns the final state.
    pub async fn spectate(&mut self) -> anyhow::Result<GameState> {
        let lobby = self.session.require_lobby()?.to_string();
        let me = self.session.user_id().clone();
        loop {
            let snapshot = self.poller.next(self.api.as_ref(), &lobby).await?;
            if snapshot.changed && self.display {
                // Spectators see the board from the side of the lowest player id.
                let viewer = snapshot.state.players.keys().next().unwrap_or(&me);
                ui::print_board(&snapshot.state, viewer);
            }
            if snapshot.state.game_over {
                if self.display {
                    let msg = snapshot.state.message.as_deref().unwrap_or("Game ended.");
                    std::println!("Game Over: {}", msg);
                }
                return Ok(snapshot.state);
            }
        }
    }
}
