#![cfg(feature = "std")]
//! Per-client session: who we are and which lobby we sit in.

use std::string::String;

use rand::Rng;

use crate::core::{PlayerId, USER_ID_ALPHABET, USER_ID_LEN};

/// Generate an 8-character lowercase alphanumeric user id.
pub fn generate_user_id<R: Rng>(rng: &mut R) -> PlayerId {
    let id: String = (0..USER_ID_LEN)
        .map(|_| USER_ID_ALPHABET[rng.random_range(0..USER_ID_ALPHABET.len())] as char)
        .collect();
    PlayerId::new(id)
}

/// Identity of one client for the lifetime of a game. The user id is fixed
/// when the session is created; the lobby id is filled in once a lobby has
/// been created or joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: PlayerId,
    nickname: String,
    lobby_id: Option<String>,
}

impl Session {
    pub fn new<R: Rng>(rng: &mut R, nickname: &str) -> anyhow::Result<Self> {
        Self::with_user_id(generate_user_id(rng), nickname)
    }

    pub fn with_user_id(user_id: PlayerId, nickname: &str) -> anyhow::Result<Self> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(anyhow::anyhow!("Nickname is required."));
        }
        Ok(Self {
            user_id,
            nickname: nickname.to_string(),
            lobby_id: None,
        })
    }

    pub fn user_id(&self) -> &PlayerId {
        &self.user_id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn lobby_id(&self) -> Option<&str> {
        self.lobby_id.as_deref()
    }

    /// Lobby id, or an error when no lobby was created or joined yet.
    pub fn require_lobby(&self) -> anyhow::Result<&str> {
        self.lobby_id()
            .ok_or_else(|| anyhow::anyhow!("Session has not joined a lobby"))
    }

    /// Record the lobby this session plays in.
    pub fn enter_lobby(&mut self, lobby_id: &str) -> anyhow::Result<()> {
        let lobby_id = lobby_id.trim();
        if lobby_id.is_empty() {
            return Err(anyhow::anyhow!("Lobby ID and Nickname are required."));
        }
        self.lobby_id = Some(lobby_id.to_string());
        Ok(())
    }
}
