//! Game manager: creates, tracks and routes events to game instances.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use murder_protocol::{Event, GameId};
use murder_session::PlayerDirectory;

use crate::actor::spawn_game;
use crate::{Dispatch, GameError, GameHandle, GameInfo, GameMode, GameStateMachine};

/// Counter for generating unique game IDs.
static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for game actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns the handles of every running game instance.
///
/// Instances are independent: each has its own actor, roster and history.
/// The manager only routes by [`GameId`]; it never moves players between
/// games.
pub struct GameManager {
    games: HashMap<GameId, GameHandle>,
    channel_size: usize,
}

impl GameManager {
    pub fn new() -> Self {
        Self::with_channel_size(DEFAULT_CHANNEL_SIZE)
    }

    /// A manager whose actors queue at most `channel_size` commands.
    pub fn with_channel_size(channel_size: usize) -> Self {
        Self {
            games: HashMap::new(),
            channel_size: channel_size.max(1),
        }
    }

    /// Starts an actor for `machine` and returns the new game's ID.
    pub fn create_game<M: GameMode, D: PlayerDirectory>(
        &mut self,
        machine: GameStateMachine<M, D>,
    ) -> GameId {
        let game_id = GameId(NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed));
        let handle = spawn_game(game_id, machine, self.channel_size);
        self.games.insert(game_id, handle);
        tracing::info!(%game_id, "game created");
        game_id
    }

    /// Delivers an event to a game and waits for the result.
    pub async fn deliver(
        &self,
        game_id: GameId,
        event: Event,
    ) -> Result<Dispatch, GameError> {
        self.handle(game_id)?.process(event).await
    }

    pub async fn game_info(&self, game_id: GameId) -> Result<GameInfo, GameError> {
        self.handle(game_id)?.info().await
    }

    /// Info for every game that answers. Games that are shutting down are
    /// skipped.
    pub async fn list_games(&self) -> Vec<GameInfo> {
        let mut infos = Vec::with_capacity(self.games.len());
        for handle in self.games.values() {
            if let Ok(info) = handle.info().await {
                infos.push(info);
            }
        }
        infos
    }

    /// Stops a game's actor and forgets it.
    pub async fn destroy_game(&mut self, game_id: GameId) -> Result<(), GameError> {
        let handle = self
            .games
            .remove(&game_id)
            .ok_or(GameError::NotFound(game_id))?;

        let _ = handle.shutdown().await;

        tracing::info!(%game_id, "game destroyed");
        Ok(())
    }

    /// A clone of a game's handle, for callers that want to talk to it
    /// without going through the manager.
    pub fn handle(&self, game_id: GameId) -> Result<GameHandle, GameError> {
        self.games
            .get(&game_id)
            .cloned()
            .ok_or(GameError::NotFound(game_id))
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn game_ids(&self) -> Vec<GameId> {
        self.games.keys().copied().collect()
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
