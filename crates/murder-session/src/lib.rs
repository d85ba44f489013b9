//! Connected-player tracking for Murder game instances.
//!
//! Events name players with opaque tokens (a display name, `P-7`, `7`).
//! A game instance turns those into [`PlayerId`](murder_protocol::PlayerId)s
//! through the [`PlayerDirectory`] trait, and only players that are
//! currently connected resolve.
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Layer (above)  ← resolves event tokens to connected players
//!     ↕
//! Session Layer (this crate)  ← knows who is online, under which name
//!     ↕
//! Protocol Layer (below)  ← provides PlayerId
//! ```

mod directory;
mod error;
mod registry;

pub use directory::PlayerDirectory;
pub use error::SessionError;
pub use registry::{OnlinePlayer, OnlinePlayers};
