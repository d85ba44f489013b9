//! Error types for the session layer.

use murder_protocol::PlayerId;

/// Errors raised while registering or removing connected players.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The player is already connected.
    #[error("player {0} is already connected")]
    AlreadyConnected(PlayerId),

    /// Another connected player already uses this display name.
    #[error("name {name:?} is already taken by {holder}")]
    NameTaken { name: String, holder: PlayerId },

    /// No connected player has this id.
    #[error("player {0} is not connected")]
    NotConnected(PlayerId),
}
