//! Token resolution hook for player arguments.
//!
//! The game core never looks players up itself. It asks a
//! [`PlayerDirectory`], which lets us:
//! - resolve against the live [`OnlinePlayers`](crate::OnlinePlayers)
//!   registry in production,
//! - share that registry with a running game actor behind a lock,
//! - use a fixed table in tests.

use std::sync::{Arc, RwLock};

use murder_protocol::PlayerId;

/// Resolves an event token to a currently-connected player.
///
/// Returning `None` is not an error: the caller treats the event argument
/// as absent and skips it.
///
/// # Example
///
/// ```rust
/// use murder_protocol::PlayerId;
/// use murder_session::PlayerDirectory;
///
/// /// Every numeric token is "online". Handy for demos.
/// struct Everyone;
///
/// impl PlayerDirectory for Everyone {
///     fn resolve(&self, token: &str) -> Option<PlayerId> {
///         token.parse().ok()
///     }
/// }
///
/// assert_eq!(Everyone.resolve("P-3"), Some(PlayerId(3)));
/// assert_eq!(Everyone.resolve("nobody"), None);
/// ```
pub trait PlayerDirectory: Send + Sync + 'static {
    /// Returns the connected player named by `token`, if any.
    fn resolve(&self, token: &str) -> Option<PlayerId>;
}

/// A shared directory resolves through a read lock. A poisoned lock
/// resolves nothing.
impl<D: PlayerDirectory> PlayerDirectory for Arc<RwLock<D>> {
    fn resolve(&self, token: &str) -> Option<PlayerId> {
        match self.read() {
            Ok(directory) => directory.resolve(token),
            Err(_) => {
                tracing::error!(token, "player directory lock poisoned");
                None
            }
        }
    }
}
