//! Error types for the protocol layer.

/// Errors raised while turning untyped input into protocol values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The event tag is not part of the vocabulary.
    #[error("unknown event type: {0}")]
    UnknownEvent(String),

    /// A token could not be read as a player identifier.
    ///
    /// Accepted forms are `P-<n>` (the `Display` form) and a bare `<n>`.
    #[error("invalid player id: {0}")]
    InvalidPlayerId(String),
}
