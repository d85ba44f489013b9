//! Round lifecycle for Murder game instances.
//!
//! One instance is a [`GameStateMachine`]: a lobby that fills with players,
//! a round where roles are drawn (murderers hidden among innocents, plus
//! hunters), and a reset back to the lobby. The world itself (maps, spawn
//! points, items) lives behind the [`GameMode`] trait.
//!
//! # Key types
//!
//! - [`GameStateMachine`]: validates and applies events, phase by phase
//! - [`GameMode`]: lifecycle and spawn hooks a concrete mode implements
//! - [`RoleAssigner`] / [`quota`]: how many of each role, and who
//! - [`Roster`]: players and spectators, kept disjoint
//! - [`RoundHistory`]: results that survive a return to the lobby
//! - [`GameManager`] / [`GameHandle`]: one actor task per instance

mod actor;
mod config;
mod error;
mod history;
mod machine;
mod manager;
mod mode;
mod roles;
mod roster;
mod state;

pub use actor::{GameHandle, GameInfo, spawn_game};
pub use config::GameConfig;
pub use error::{GameError, SpawnKind};
pub use history::{RoundHistory, RoundRecord};
pub use machine::{Dispatch, GameStateMachine};
pub use manager::GameManager;
pub use mode::GameMode;
pub use roles::{Role, RoleAssigner, RoleAssignment, quota};
pub use roster::Roster;
pub use state::{GameState, Outcome, Phase, Round};
