use alloc::collections::BTreeMap;
use alloc::string::String;

use super::{
    board::Board,
    common::PlayerId,
    config::PLAYERS_PER_GAME,
    win::check_win,
};

/// Snapshot of a lobby as seen by one client. Rebuilt from scratch on every
/// poll; nothing carries over between snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub players: BTreeMap<PlayerId, String>,
    pub current_player: Option<PlayerId>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub message: Option<String>,
}

/// Where the game stands from one participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than two players have joined.
    WaitingForPlayers,
    MyTurn,
    OpponentTurn,
    Over,
}

/// How a finished game ended for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Draw,
    /// Finished without a decisive board, carrying the server's message.
    Ended(String),
}

impl GameState {
    /// Fresh state for a lobby with no moves yet.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            players: BTreeMap::new(),
            current_player: None,
            game_over: false,
            winner: None,
            message: None,
        }
    }

    /// Any player id other than `me`, if one has joined.
    pub fn opponent_of(&self, me: &PlayerId) -> Option<&PlayerId> {
        self.players.keys().find(|id| *id != me)
    }

    pub fn nickname(&self, id: &PlayerId) -> Option<&str> {
        self.players.get(id).map(String::as_str)
    }

    /// `true` once both seats are taken.
    pub fn is_ready(&self) -> bool {
        self.players.len() >= PLAYERS_PER_GAME
    }

    pub fn is_turn_of(&self, id: &PlayerId) -> bool {
        self.current_player.as_ref() == Some(id)
    }

    pub fn phase(&self, me: &PlayerId) -> Phase {
        if self.game_over {
            Phase::Over
        } else if !self.is_ready() || self.current_player.is_none() {
            Phase::WaitingForPlayers
        } else if self.is_turn_of(me) {
            Phase::MyTurn
        } else {
            Phase::OpponentTurn
        }
    }

    /// Result for `me` once the game is over, `None` while it is running.
    ///
    /// The server does not always fill in `winner`, so the board itself is
    /// checked when it is missing.
    pub fn outcome_for(&self, me: &PlayerId) -> Option<Outcome> {
        if !self.game_over {
            return None;
        }
        let outcome = match &self.winner {
            Some(w) if w == me => Outcome::Won,
            Some(_) => Outcome::Lost,
            None if check_win(&self.board, me) => Outcome::Won,
            None if self
                .opponent_of(me)
                .is_some_and(|op| check_win(&self.board, op)) =>
            {
                Outcome::Lost
            }
            None if self.board.is_full() => Outcome::Draw,
            None => Outcome::Ended(
                self.message
                    .clone()
                    .unwrap_or_else(|| String::from("Game ended.")),
            ),
        };
        Some(outcome)
    }
}
