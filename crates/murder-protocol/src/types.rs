//! Core protocol types: identifiers, locations, and the event vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Newtype over `u64` so it can't be confused with a [`GameId`].
/// Serialized as the bare number; displayed as `P-<n>`.
///
/// `Ord` gives a stable order to sort by before any random draw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ProtocolError;

    /// Parses either the display form (`P-42`) or a bare number (`42`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("P-")
            .or_else(|| trimmed.strip_prefix("p-"))
            .unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(PlayerId)
            .map_err(|_| ProtocolError::InvalidPlayerId(s.to_string()))
    }
}

/// A unique identifier for one game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A point in a named world, as returned by a game mode's spawn provider.
///
/// The core never interprets the coordinates; it only stores them in the
/// round so the mode can teleport players and place scrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({:.1}, {:.1}, {:.1})", self.world, self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// EventKind: the fixed vocabulary
// ---------------------------------------------------------------------------

/// Every event type a game instance understands.
///
/// The wire tag of each variant is its SCREAMING_SNAKE_CASE name
/// (`GAME_RESET`, `ADD_PLAYER`, ...), used both by serde and by
/// [`FromStr`]/[`Display`](fmt::Display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Hard reset to lobby: cancels the round and wipes the roster and
    /// all round-persistent data.
    GameReset,
    /// Moves the lobby into the game, closing the window for players to join.
    GameStart,
    /// Starts the round proper: assigns roles and spawns everyone.
    Activate,
    DeclareInnocentVictory,
    DeclareMurdererVictory,
    Pause,
    Resume,
    /// Soft reset to lobby. Unlike [`EventKind::GameReset`], round-persistent
    /// data survives.
    ReturnToLobby,
    AddPlayer,
    AddSpectator,
    /// Marks a role-holder of the running round as eliminated.
    EliminatePlayer,
}

impl EventKind {
    /// The complete vocabulary, in declaration order.
    pub const VOCABULARY: [EventKind; 11] = [
        EventKind::GameReset,
        EventKind::GameStart,
        EventKind::Activate,
        EventKind::DeclareInnocentVictory,
        EventKind::DeclareMurdererVictory,
        EventKind::Pause,
        EventKind::Resume,
        EventKind::ReturnToLobby,
        EventKind::AddPlayer,
        EventKind::AddSpectator,
        EventKind::EliminatePlayer,
    ];

    /// The wire tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::GameReset => "GAME_RESET",
            Self::GameStart => "GAME_START",
            Self::Activate => "ACTIVATE",
            Self::DeclareInnocentVictory => "DECLARE_INNOCENT_VICTORY",
            Self::DeclareMurdererVictory => "DECLARE_MURDERER_VICTORY",
            Self::Pause => "PAUSE",
            Self::Resume => "RESUME",
            Self::ReturnToLobby => "RETURN_TO_LOBBY",
            Self::AddPlayer => "ADD_PLAYER",
            Self::AddSpectator => "ADD_SPECTATOR",
            Self::EliminatePlayer => "ELIMINATE_PLAYER",
        }
    }

    /// Returns `true` for kinds handled before per-phase dispatch,
    /// regardless of the current phase.
    pub fn is_state_insensitive(self) -> bool {
        matches!(self, Self::AddSpectator | Self::GameReset)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EventKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VOCABULARY
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ProtocolError::UnknownEvent(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single event delivered to a game instance.
///
/// Immutable once built: a kind plus an ordered list of opaque tokens.
/// For `ADD_PLAYER`, `ADD_SPECTATOR` and `ELIMINATE_PLAYER`, `args[0]`
/// names the player; the game resolves it against its player directory.
///
/// JSON form: `{ "type": "ADD_PLAYER", "args": ["alice"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default)]
    args: Vec<String>,
}

impl Event {
    /// Builds an event from a kind and its arguments.
    pub fn new<I, S>(kind: EventKind, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// An event with no arguments.
    pub fn bare(kind: EventKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    /// An event carrying a single player token.
    pub fn for_player(kind: EventKind, token: impl Into<String>) -> Self {
        Self {
            kind,
            args: vec![token.into()],
        }
    }

    /// Builds an event from an untyped tag, as delivered by a transport.
    ///
    /// # Errors
    /// [`ProtocolError::UnknownEvent`] if `tag` is outside the vocabulary.
    pub fn parse<I, S>(tag: &str, args: I) -> Result<Self, ProtocolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = tag.parse::<EventKind>()?;
        Ok(Self::new(kind, args))
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.kind, self.args)
    }
}
