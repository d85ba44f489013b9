//! The game state machine: one instance of a Murder game.
//!
//! Every mutation of an instance goes through [`GameStateMachine::process_event`]:
//!
//! 1. State-insensitive events (`ADD_SPECTATOR`, `GAME_RESET`) are applied
//!    whatever the phase.
//! 2. The (possibly new) phase picks exactly one per-phase handler.
//! 3. A kind the handler doesn't accept is dropped.
//!
//! Failures are returned as values and logged here. The machine is always
//! left in a valid phase and keeps accepting events.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use murder_protocol::{Event, EventKind, Location, PlayerId};
use murder_session::PlayerDirectory;
use tracing::{debug, error, info, trace, warn};

use crate::{
    GameConfig, GameError, GameMode, GameState, Outcome, Phase, RoleAssigner,
    Roster, Round, RoundHistory, RoundRecord, SpawnKind, quota,
};

/// What processing one event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The roster, the round or the phase changed.
    Handled,
    /// Not accepted in this phase, or its player token resolved to nothing.
    Ignored,
    /// Activation could not complete and the instance went back to the lobby.
    Aborted(GameError),
}

impl Dispatch {
    /// Combines the state-insensitive and per-phase results of one event.
    fn then(self, next: Dispatch) -> Dispatch {
        match (self, next) {
            (first, Dispatch::Ignored) => first,
            (_, next) => next,
        }
    }
}

/// A single game instance.
///
/// Not reentrant: drive it from one task (see [`spawn_game`](crate::spawn_game)).
/// Independent instances share nothing and can run in parallel.
pub struct GameStateMachine<M: GameMode, D: PlayerDirectory> {
    state: GameState,
    roster: Roster,
    history: RoundHistory,
    config: GameConfig,
    assigner: RoleAssigner,
    mode: M,
    directory: D,
}

impl<M: GameMode, D: PlayerDirectory> GameStateMachine<M, D> {
    /// Creates an instance in the lobby with an empty roster.
    ///
    /// No hook runs here; call [`load`](Self::load) before the first event.
    pub fn new(mode: M, directory: D, config: GameConfig) -> Self {
        Self {
            state: GameState::Lobby,
            roster: Roster::new(),
            history: RoundHistory::new(),
            config,
            assigner: RoleAssigner::new(),
            mode,
            directory,
        }
    }

    /// Replaces the role assigner, e.g. with [`RoleAssigner::seeded`].
    pub fn with_assigner(mut self, assigner: RoleAssigner) -> Self {
        self.assigner = assigner;
        self
    }

    /// Brings the world into lobby shape when the instance is first loaded.
    pub fn load(&mut self) -> Result<(), GameError> {
        self.mode.back_to_lobby()?;
        info!(phase = %self.phase(), "game loaded");
        Ok(())
    }

    /// Applies one event. The only way to change an instance.
    ///
    /// `Err` means the event failed part-way; the error has been logged and
    /// the machine is in a valid phase (the one it was in, unless the failure
    /// came after a completed transition). A panic while handling the event
    /// is caught here and returned as [`GameError::Panicked`].
    pub fn process_event(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        let kind = event.kind();
        let phase = self.phase();
        trace!(event = %kind, args = ?event.args(), %phase, "event received");

        // Mode hooks may panic; that is reported like any other failure.
        let result = match panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(event))) {
            Ok(result) => result,
            Err(payload) => Err(GameError::Panicked {
                event: kind,
                message: panic_message(payload.as_ref()),
            }),
        };
        match &result {
            Ok(Dispatch::Handled) => {}
            Ok(Dispatch::Ignored) => {
                debug!(event = %kind, %phase, "event ignored");
            }
            Ok(Dispatch::Aborted(reason)) => {
                warn!(event = %kind, %reason, "transition aborted, back to lobby");
            }
            Err(err) => {
                error!(event = %kind, %phase, error = %err, "error while handling event");
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// `true` in every phase but the lobby: new players can't join.
    /// Spectators are admitted regardless.
    pub fn is_locked(&self) -> bool {
        !self.phase().is_joinable()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn round(&self) -> Option<&Round> {
        self.state.round()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    pub fn mode_mut(&mut self) -> &mut M {
        &mut self.mode
    }

    pub fn murderer_number(&self) -> f64 {
        self.config.murderer_number
    }

    /// Takes effect at the next activation. Not validated; see
    /// [`GameConfig::validate`].
    pub fn set_murderer_number(&mut self, value: f64) {
        self.config.murderer_number = value;
    }

    pub fn hunter_number(&self) -> f64 {
        self.config.hunter_number
    }

    pub fn set_hunter_number(&mut self, value: f64) {
        self.config.hunter_number = value;
    }

    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        let insensitive = if event.kind().is_state_insensitive() {
            self.handle_state_insensitive(event)?
        } else {
            Dispatch::Ignored
        };

        // Re-read: GAME_RESET may have moved us.
        let sensitive = match self.phase() {
            Phase::Lobby => self.handle_lobby_event(event)?,
            Phase::Starting => self.handle_starting_event(event)?,
            Phase::Active => self.handle_active_event(event)?,
            Phase::Paused => self.handle_paused_event(event)?,
            Phase::Resetting => self.handle_resetting_event(event)?,
        };

        Ok(insensitive.then(sensitive))
    }

    fn handle_state_insensitive(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        match event.kind() {
            EventKind::AddSpectator => {
                let spectator = self.resolve_player(event);
                if !self.roster.add_spectator(spectator) {
                    return Ok(Dispatch::Ignored);
                }
                if let Some(spectator) = spectator {
                    info!(
                        player_id = %spectator,
                        spectators = self.roster.spectators().len(),
                        "spectator added"
                    );
                }
                Ok(Dispatch::Handled)
            }
            EventKind::GameReset => {
                self.mode.back_to_lobby()?;
                self.roster.clear();
                self.history.clear();
                self.transition(GameState::Lobby);
                info!("hard reset: roster and history cleared");
                Ok(Dispatch::Handled)
            }
            _ => Ok(Dispatch::Ignored),
        }
    }

    fn handle_lobby_event(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        self.expect_phase(Phase::Lobby)?;
        match event.kind() {
            EventKind::AddPlayer => {
                let player = self.resolve_player(event);
                if !self.roster.add_player(player) {
                    return Ok(Dispatch::Ignored);
                }
                if let Some(player) = player {
                    info!(
                        player_id = %player,
                        players = self.roster.players().len(),
                        "player joined"
                    );
                }
                Ok(Dispatch::Handled)
            }
            EventKind::GameStart => {
                self.mode.lobby_to_game(&self.roster)?;
                self.transition(GameState::Starting);
                Ok(Dispatch::Handled)
            }
            // Reserved: pausing an open lobby does nothing yet.
            EventKind::Pause => Ok(Dispatch::Ignored),
            _ => Ok(Dispatch::Ignored),
        }
    }

    fn handle_starting_event(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        self.expect_phase(Phase::Starting)?;
        match event.kind() {
            EventKind::Activate => self.activate(),
            _ => Ok(Dispatch::Ignored),
        }
    }

    fn handle_active_event(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        self.expect_phase(Phase::Active)?;
        match event.kind() {
            EventKind::DeclareInnocentVictory => self.finish_round(Outcome::InnocentVictory),
            EventKind::DeclareMurdererVictory => self.finish_round(Outcome::MurdererVictory),
            EventKind::Pause => {
                let round = self.take_round();
                self.transition(GameState::Paused(round));
                Ok(Dispatch::Handled)
            }
            EventKind::EliminatePlayer => self.eliminate(event),
            _ => Ok(Dispatch::Ignored),
        }
    }

    fn handle_paused_event(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        self.expect_phase(Phase::Paused)?;
        match event.kind() {
            EventKind::Resume => {
                let round = self.take_round();
                self.transition(GameState::Active(round));
                Ok(Dispatch::Handled)
            }
            _ => Ok(Dispatch::Ignored),
        }
    }

    fn handle_resetting_event(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        self.expect_phase(Phase::Resetting)?;
        match event.kind() {
            EventKind::ReturnToLobby => {
                self.mode.back_to_lobby()?;
                // Dropping the round clears round data; roster and history stay.
                self.transition(GameState::Lobby);
                Ok(Dispatch::Handled)
            }
            _ => Ok(Dispatch::Ignored),
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn activate(&mut self) -> Result<Dispatch, GameError> {
        match self.prepare_round() {
            Ok(round) => {
                info!(
                    round = round.number,
                    murderers = round.assignment.murderers.len(),
                    hunters = round.assignment.hunters.len(),
                    innocents = round.assignment.innocents.len(),
                    scrap = round.scrap.len(),
                    "roles assigned"
                );
                self.mode.roles_assigned(&round);
                self.transition(GameState::Active(round));
                Ok(Dispatch::Handled)
            }
            Err(reason @ (GameError::InsufficientPlayers | GameError::NoSpawnAvailable(_))) => {
                self.mode.back_to_lobby()?;
                self.transition(GameState::Lobby);
                Ok(Dispatch::Aborted(reason))
            }
            Err(other) => Err(other),
        }
    }

    /// Draws roles and spawn points. Nothing is stored until it all succeeds.
    fn prepare_round(&mut self) -> Result<Round, GameError> {
        let players = self.roster.players();
        let size = players.len();
        let assignment = self.assigner.assign(
            players,
            quota(size, self.config.murderer_number),
            quota(size, self.config.hunter_number),
        )?;

        let mut round = Round::new(self.history.next_round_number(), assignment);

        for player in self.roster.sorted_players() {
            let location = self.spawn(SpawnKind::Player)?;
            round.spawns.push((player, location));
        }

        for item in 0..self.config.scrap_count {
            match self.spawn(SpawnKind::Scrap) {
                Ok(location) => round.scrap.push(location),
                Err(err) => warn!(item, error = %err, "scrap item skipped"),
            }
        }

        Ok(round)
    }

    /// Asks the mode for a location, retrying up to `spawn_attempts` times.
    fn spawn(&mut self, kind: SpawnKind) -> Result<Location, GameError> {
        let attempts = self.config.spawn_attempts.max(1);
        for attempt in 1..=attempts {
            let requested = match kind {
                SpawnKind::Player => self.mode.random_player_spawn(),
                SpawnKind::Scrap => self.mode.random_scrap_spawn(),
            };
            match requested {
                Ok(location) => return Ok(location),
                Err(err) => {
                    debug!(%kind, attempt, attempts, error = %err, "spawn request failed");
                }
            }
        }
        Err(GameError::NoSpawnAvailable(kind))
    }

    fn eliminate(&mut self, event: &Event) -> Result<Dispatch, GameError> {
        let Some(player) = self.resolve_player(event) else {
            return Ok(Dispatch::Ignored);
        };
        let actual = self.phase();
        let GameState::Active(round) = &mut self.state else {
            return Err(GameError::DispatchMismatch {
                expected: Phase::Active,
                actual,
            });
        };
        if !round.eliminate(player) {
            debug!(player_id = %player, "not an active participant");
            return Ok(Dispatch::Ignored);
        }

        info!(
            player_id = %player,
            survivors = round.survivors().count(),
            "player eliminated"
        );

        let decided = round.decided_outcome();
        if self.config.auto_declare_victory {
            if let Some(outcome) = decided {
                return self.finish_round(outcome);
            }
        }
        Ok(Dispatch::Handled)
    }

    fn finish_round(&mut self, outcome: Outcome) -> Result<Dispatch, GameError> {
        let round = self.take_round();
        let record = RoundRecord::from_round(&round, outcome);
        info!(round = record.number, %outcome, "round finished");

        self.history.record(record.clone());
        self.mode.round_finished(&record);
        self.transition(GameState::Resetting { round, outcome });
        Ok(Dispatch::Handled)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: GameState) {
        let from = self.phase();
        let to = next.phase();
        self.state = next;
        info!(%from, %to, "phase changed");
    }

    /// Moves the round out of the current state, leaving an empty one in
    /// place. The phase is unchanged until the caller transitions.
    fn take_round(&mut self) -> Round {
        match &mut self.state {
            GameState::Active(round)
            | GameState::Paused(round)
            | GameState::Resetting { round, .. } => std::mem::take(round),
            GameState::Lobby | GameState::Starting => Round::default(),
        }
    }

    fn resolve_player(&self, event: &Event) -> Option<PlayerId> {
        let token = event.arg(0)?;
        let resolved = self.directory.resolve(token);
        if resolved.is_none() {
            debug!(event = %event.kind(), token, "player token did not resolve");
        }
        resolved
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(self.mismatch(expected))
        }
    }

    fn mismatch(&self, expected: Phase) -> GameError {
        GameError::DispatchMismatch {
            expected,
            actual: self.phase(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
