//! # Murder
//!
//! Controller for instances of Murder, a social-deduction game: players
//! gather in a lobby, a round hides murderers among innocents and hunters,
//! and the instance resets to the lobby when one side wins.
//!
//! A concrete game mode implements [`GameMode`](murder_game::GameMode)
//! for its world (spawn points, teleports, items). This crate drives the
//! round lifecycle, one actor task per instance.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::{Arc, RwLock};
//!
//! use murder::prelude::*;
//!
//! # struct MyMode;
//! # impl GameMode for MyMode {
//! #     fn random_player_spawn(&mut self) -> Result<Location, GameError> {
//! #         Ok(Location::new("world", 0.0, 64.0, 0.0))
//! #     }
//! #     fn random_scrap_spawn(&mut self) -> Result<Location, GameError> {
//! #         Ok(Location::new("world", 4.0, 64.0, 4.0))
//! #     }
//! #     fn lobby_to_game(&mut self, _: &Roster) -> Result<(), GameError> { Ok(()) }
//! #     fn back_to_lobby(&mut self) -> Result<(), GameError> { Ok(()) }
//! # }
//! # #[tokio::main]
//! # async fn main() -> Result<(), MurderError> {
//! murder::logging::init();
//!
//! let online = Arc::new(RwLock::new(OnlinePlayers::new()));
//! let mut games = GameManager::new();
//! let game = games.create_game(GameStateMachine::new(
//!     MyMode,
//!     Arc::clone(&online),
//!     GameConfig::default(),
//! ));
//!
//! games.deliver(game, Event::parse("ADD_PLAYER", ["alice"])?).await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod logging;

pub use error::MurderError;

pub mod prelude {
    pub use crate::MurderError;
    pub use murder_game::{
        Dispatch, GameConfig, GameError, GameHandle, GameInfo, GameManager, GameMode,
        GameState, GameStateMachine, Outcome, Phase, Role, RoleAssigner, RoleAssignment,
        Roster, Round, RoundHistory, RoundRecord, SpawnKind,
    };
    pub use murder_protocol::{Event, EventKind, GameId, Location, PlayerId, ProtocolError};
    pub use murder_session::{OnlinePlayer, OnlinePlayers, PlayerDirectory, SessionError};
}
