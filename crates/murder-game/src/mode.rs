//! The `GameMode` trait: what a concrete Murder variant plugs into the core.
//!
//! The state machine owns the rules of the round lifecycle. Everything that
//! touches a world (resetting maps, handing out items, teleporting players,
//! placing scrap, showing titles) belongs to the mode and is reached through
//! these hooks.

use murder_protocol::Location;

use crate::{GameError, Roster, Round, RoundRecord};

/// Capabilities a game mode provides to the state machine.
///
/// Hooks are synchronous from the machine's point of view: it only moves
/// to the next phase after a hook returns `Ok`. A mode whose world work is
/// asynchronous must finish it (or fail) before returning.
///
/// Tests implement this with a recording double to check exactly which
/// hooks a transition fired.
pub trait GameMode: Send + 'static {
    /// Next location to spawn a player at.
    ///
    /// # Errors
    /// [`GameError::NoSpawnAvailable`] if none is usable right now. The
    /// machine retries up to `GameConfig::spawn_attempts` times.
    fn random_player_spawn(&mut self) -> Result<Location, GameError>;

    /// Next location to place a scrap item at. Same contract as
    /// [`random_player_spawn`](Self::random_player_spawn).
    fn random_scrap_spawn(&mut self) -> Result<Location, GameError>;

    /// Prepares the world for a round.
    ///
    /// Called on `LOBBY → STARTING`. If it fails, the machine stays in the
    /// lobby.
    fn lobby_to_game(&mut self, roster: &Roster) -> Result<(), GameError>;

    /// Tears the round down and restores the lobby.
    ///
    /// Called when the instance is loaded, on `RESETTING → LOBBY`, on a hard
    /// reset, and when activation is aborted.
    fn back_to_lobby(&mut self) -> Result<(), GameError>;

    /// Roles are drawn and everyone has a spawn point. Default: no-op.
    fn roles_assigned(&mut self, _round: &Round) {}

    /// A round was decided and recorded. Default: no-op.
    fn round_finished(&mut self, _record: &RoundRecord) {}
}
