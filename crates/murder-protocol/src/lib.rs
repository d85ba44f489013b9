//! Identity and event vocabulary for Murder game instances.
//!
//! This crate defines what the outside world hands to a game controller:
//!
//! - **Identity** ([`PlayerId`], [`GameId`]): who is playing, and where.
//! - **Events** ([`Event`], [`EventKind`]): the fixed vocabulary a game
//!   instance understands, each with an ordered list of opaque tokens.
//! - **Locations** ([`Location`]): spawn points handed back by a game mode.
//! - **Errors** ([`ProtocolError`]): what can go wrong while building
//!   events from untyped input.
//!
//! ```text
//! Transport (tags + tokens) → Protocol (Event) → Game (state machine)
//! ```

mod error;
mod types;

pub use error::ProtocolError;
pub use types::{Event, EventKind, GameId, Location, PlayerId};
