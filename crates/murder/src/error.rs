//! Unified error type for the Murder crates.

use murder_game::GameError;
use murder_protocol::ProtocolError;
use murder_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// `?` converts any sub-crate error into this one, so an embedding
/// application that parses events, tracks online players and drives games
/// needs only one error type.
#[derive(Debug, thiserror::Error)]
pub enum MurderError {
    /// An event tag or player token could not be parsed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A player registry operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A game instance failed to handle a request.
    #[error(transparent)]
    Game(#[from] GameError),
}
