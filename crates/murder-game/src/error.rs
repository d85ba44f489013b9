//! Error types for the game layer.

use std::fmt;

use murder_protocol::{EventKind, GameId};

use crate::Phase;

/// What a spawn request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Player,
    Scrap,
}

impl fmt::Display for SpawnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Scrap => write!(f, "scrap"),
        }
    }
}

/// Errors that can occur while running a game instance.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// Roles can't be assigned to an empty roster.
    /// Activation aborts back to the lobby.
    #[error("not enough players to assign roles")]
    InsufficientPlayers,

    /// The game mode had no usable spawn location.
    #[error("no {0} spawn available")]
    NoSpawnAvailable(SpawnKind),

    /// A lifecycle hook of the game mode failed.
    #[error("{hook} hook failed: {reason}")]
    Hook { hook: &'static str, reason: String },

    /// A per-phase handler was entered while the machine was in another
    /// phase. Always a dispatch bug.
    #[error("handler for {expected} entered in phase {actual}")]
    DispatchMismatch { expected: Phase, actual: Phase },

    /// Handling the event panicked, most likely inside a game mode hook.
    /// The instance keeps running in whatever state the panic left it.
    #[error("panic while handling {event}: {message}")]
    Panicked { event: EventKind, message: String },

    /// Configuration rejected by [`GameConfig::validate`](crate::GameConfig::validate).
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    /// The game instance does not exist.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// The game's command channel is full or closed.
    #[error("game {0} is unavailable")]
    Unavailable(GameId),
}

impl GameError {
    /// Convenience for game modes reporting a hook failure.
    pub fn hook(hook: &'static str, reason: impl Into<String>) -> Self {
        Self::Hook {
            hook,
            reason: reason.into(),
        }
    }
}
