//! The online-player registry: who is connected right now.
//!
//! # Concurrency note
//!
//! `OnlinePlayers` is a plain pair of `HashMap`s with no locking. Whoever
//! accepts connections owns it; to let a game actor resolve tokens at the
//! same time, wrap it in `Arc<RwLock<_>>`, which is itself a
//! [`PlayerDirectory`].

use std::collections::HashMap;

use murder_protocol::PlayerId;

use crate::{PlayerDirectory, SessionError};

/// A connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlinePlayer {
    pub player_id: PlayerId,
    /// Display name as given at connect time, without surrounding whitespace.
    pub name: String,
}

/// Registry of connected players, indexed by id and by display name.
///
/// ## Token resolution
///
/// ```text
/// "Alice" / "alice"  ──→ name index (case-insensitive)
/// "P-7" / "7"        ──→ id, if that id is connected
/// anything else      ──→ None
/// ```
#[derive(Debug, Default)]
pub struct OnlinePlayers {
    players: HashMap<PlayerId, OnlinePlayer>,

    /// Lower-cased name → id. Kept in sync with `players`.
    names: HashMap<String, PlayerId>,
}

impl OnlinePlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly connected player.
    ///
    /// # Errors
    /// - [`SessionError::AlreadyConnected`] if `player_id` is online
    /// - [`SessionError::NameTaken`] if another online player uses `name`
    ///   (names are trimmed and compare case-insensitively)
    pub fn connect(
        &mut self,
        player_id: PlayerId,
        name: impl Into<String>,
    ) -> Result<&OnlinePlayer, SessionError> {
        if self.players.contains_key(&player_id) {
            return Err(SessionError::AlreadyConnected(player_id));
        }

        let name = name.into().trim().to_string();
        let key = name.to_lowercase();
        if let Some(holder) = self.names.get(&key) {
            return Err(SessionError::NameTaken {
                name,
                holder: *holder,
            });
        }

        self.names.insert(key, player_id);
        tracing::info!(%player_id, name = %name, "player connected");
        let player = self
            .players
            .entry(player_id)
            .or_insert(OnlinePlayer { player_id, name });
        Ok(&*player)
    }

    /// Removes a player that went offline and returns their record.
    ///
    /// # Errors
    /// [`SessionError::NotConnected`] if the player is not online.
    pub fn disconnect(
        &mut self,
        player_id: PlayerId,
    ) -> Result<OnlinePlayer, SessionError> {
        let player = self
            .players
            .remove(&player_id)
            .ok_or(SessionError::NotConnected(player_id))?;
        self.names.remove(&player.name.to_lowercase());

        tracing::info!(%player_id, "player disconnected");
        Ok(player)
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&OnlinePlayer> {
        self.players.get(player_id)
    }

    pub fn is_connected(&self, player_id: &PlayerId) -> bool {
        self.players.contains_key(player_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerDirectory for OnlinePlayers {
    fn resolve(&self, token: &str) -> Option<PlayerId> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        // Names win over ids so a player literally named "7" still resolves
        // to themselves.
        if let Some(id) = self.names.get(&token.to_lowercase()) {
            return Some(*id);
        }

        token
            .parse::<PlayerId>()
            .ok()
            .filter(|id| self.players.contains_key(id))
    }
}
