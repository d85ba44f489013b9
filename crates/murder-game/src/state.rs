//! Lifecycle state of a game instance.

use std::collections::HashSet;
use std::fmt;

use murder_protocol::{Location, PlayerId};
use serde::{Deserialize, Serialize};

use crate::RoleAssignment;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The payload-free view of [`GameState`].
///
/// ```text
///            GAME_START          ACTIVATE             DECLARE_*
///   Lobby ─────────────→ Starting ───────→ Active ─────────────→ Resetting
///     ↑                     │              │    ↑                    │
///     │   (assignment or    │        PAUSE │    │ RESUME             │
///     ├──── spawn failed) ──┘              ↓    │                    │
///     │                                   Paused                     │
///     └──────────────────────── RETURN_TO_LOBBY ─────────────────────┘
///
///   GAME_RESET: any phase → Lobby
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Lobby,
    Starting,
    Active,
    Paused,
    Resetting,
}

impl Phase {
    /// Returns `true` if new players may join. Only the lobby is open;
    /// spectators are admitted in every phase.
    pub fn is_joinable(self) -> bool {
        matches!(self, Self::Lobby)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "LOBBY"),
            Self::Starting => write!(f, "STARTING"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Resetting => write!(f, "RESETTING"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InnocentVictory,
    MurdererVictory,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InnocentVictory => write!(f, "innocent victory"),
            Self::MurdererVictory => write!(f, "murderer victory"),
        }
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

/// Everything that belongs to the round in progress.
///
/// Created on activation, carried through `Active`/`Paused`/`Resetting`,
/// and dropped when the instance goes back to the lobby.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Round {
    /// 1-based round counter within the instance's history.
    pub number: u32,
    pub assignment: RoleAssignment,
    pub eliminated: HashSet<PlayerId>,
    /// Where each player was spawned, in player-id order.
    pub spawns: Vec<(PlayerId, Location)>,
    pub scrap: Vec<Location>,
}

impl Round {
    pub fn new(number: u32, assignment: RoleAssignment) -> Self {
        Self {
            number,
            assignment,
            ..Self::default()
        }
    }

    pub fn is_eliminated(&self, player: &PlayerId) -> bool {
        self.eliminated.contains(player)
    }

    /// Marks a participant as eliminated.
    ///
    /// Returns `false` (and changes nothing) if the player holds no role
    /// in this round or is already out.
    pub fn eliminate(&mut self, player: PlayerId) -> bool {
        if self.assignment.role_of(&player).is_none() {
            return false;
        }
        self.eliminated.insert(player)
    }

    /// Players still in the round.
    pub fn survivors(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.assignment
            .participants()
            .filter(|p| !self.eliminated.contains(p))
    }

    /// Decides the round from eliminations alone, if it is decided.
    ///
    /// All murderers out → innocents win. Otherwise, every non-murderer out
    /// → murderers win.
    pub fn decided_outcome(&self) -> Option<Outcome> {
        let murderers = &self.assignment.murderers;
        if !murderers.is_empty() && murderers.iter().all(|p| self.is_eliminated(p)) {
            return Some(Outcome::InnocentVictory);
        }
        let innocents_remaining = self
            .survivors()
            .any(|p| !murderers.contains(&p));
        if !innocents_remaining {
            return Some(Outcome::MurdererVictory);
        }
        None
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// Current lifecycle state, carrying the round where one exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GameState {
    #[default]
    Lobby,
    Starting,
    Active(Round),
    Paused(Round),
    Resetting { round: Round, outcome: Outcome },
}

impl GameState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Lobby => Phase::Lobby,
            Self::Starting => Phase::Starting,
            Self::Active(_) => Phase::Active,
            Self::Paused(_) => Phase::Paused,
            Self::Resetting { .. } => Phase::Resetting,
        }
    }

    /// The round in progress, if any.
    pub fn round(&self) -> Option<&Round> {
        match self {
            Self::Active(round) | Self::Paused(round) | Self::Resetting { round, .. } => {
                Some(round)
            }
            Self::Lobby | Self::Starting => None,
        }
    }
}
