//! Game actor: a Tokio task that owns one state machine.
//!
//! The machine is not reentrant, so each instance gets one task and one
//! bounded command queue. Callers hold a cheap [`GameHandle`]; nothing
//! outside the task ever touches the machine.

use std::panic::{self, AssertUnwindSafe};

use murder_protocol::{Event, GameId};
use murder_session::PlayerDirectory;
use tokio::sync::{mpsc, oneshot};

use crate::{Dispatch, GameConfig, GameError, GameMode, GameStateMachine, Phase};

/// Commands sent to a game actor through its channel.
pub(crate) enum GameCommand {
    /// Process an event. `reply` is `None` for fire-and-forget delivery.
    Event {
        event: Event,
        reply: Option<oneshot::Sender<Result<Dispatch, GameError>>>,
    },

    /// Replace the configuration. Applies from the next activation.
    Configure { config: GameConfig },

    /// Request a snapshot of instance metadata.
    GetInfo { reply: oneshot::Sender<GameInfo> },

    /// Stop the actor.
    Shutdown,
}

/// A snapshot of instance metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInfo {
    pub game_id: GameId,
    pub phase: Phase,
    /// `true` unless the lobby is open to new players.
    pub locked: bool,
    pub player_count: usize,
    pub spectator_count: usize,
    pub rounds_played: usize,
    /// Number of the round in progress, if any.
    pub round: Option<u32>,
}

/// Handle to a running game actor.
///
/// Cloning is cheap (an `mpsc::Sender`), and every clone feeds the same
/// queue, so events from all clones are processed one at a time in
/// arrival order.
#[derive(Clone)]
pub struct GameHandle {
    game_id: GameId,
    sender: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Delivers an event and waits for the machine's verdict.
    pub async fn process(&self, event: Event) -> Result<Dispatch, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(GameCommand::Event {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))?
    }

    /// Delivers an event without waiting for it to be processed.
    pub async fn send_event(&self, event: Event) -> Result<(), GameError> {
        self.sender
            .send(GameCommand::Event { event, reply: None })
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))
    }

    /// Replaces the instance's configuration.
    pub async fn configure(&self, config: GameConfig) -> Result<(), GameError> {
        self.sender
            .send(GameCommand::Configure { config })
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))
    }

    pub async fn info(&self) -> Result<GameInfo, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(GameCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))
    }

    /// Tells the actor to stop. Commands queued before this one still run
    /// in order; anything sent afterwards is lost.
    pub async fn shutdown(&self) -> Result<(), GameError> {
        self.sender
            .send(GameCommand::Shutdown)
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))
    }
}

struct GameActor<M: GameMode, D: PlayerDirectory> {
    game_id: GameId,
    machine: GameStateMachine<M, D>,
    receiver: mpsc::Receiver<GameCommand>,
}

impl<M: GameMode, D: PlayerDirectory> GameActor<M, D> {
    async fn run(mut self) {
        tracing::info!(game_id = %self.game_id, "game actor started");

        match panic::catch_unwind(AssertUnwindSafe(|| self.machine.load())) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(game_id = %self.game_id, error = %err, "initial lobby setup failed");
            }
            Err(_) => {
                tracing::error!(game_id = %self.game_id, "initial lobby setup panicked");
            }
        }

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                GameCommand::Event { event, reply } => {
                    let result = self.machine.process_event(&event);
                    if let Some(reply) = reply {
                        let _ = reply.send(result);
                    }
                }
                GameCommand::Configure { config } => {
                    tracing::info!(game_id = %self.game_id, ?config, "configuration replaced");
                    self.machine.set_config(config);
                }
                GameCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                GameCommand::Shutdown => {
                    tracing::info!(game_id = %self.game_id, "game shutting down");
                    break;
                }
            }
        }

        tracing::info!(game_id = %self.game_id, "game actor stopped");
    }

    fn info(&self) -> GameInfo {
        let roster = self.machine.roster();
        GameInfo {
            game_id: self.game_id,
            phase: self.machine.phase(),
            locked: self.machine.is_locked(),
            player_count: roster.players().len(),
            spectator_count: roster.spectators().len(),
            rounds_played: self.machine.history().rounds_played(),
            round: self.machine.round().map(|r| r.number),
        }
    }
}

/// Spawns an actor task for `machine` and returns a handle to it.
///
/// The actor calls [`GameStateMachine::load`] before taking commands.
/// `channel_size` bounds the queue; senders wait when it's full.
pub fn spawn_game<M: GameMode, D: PlayerDirectory>(
    game_id: GameId,
    machine: GameStateMachine<M, D>,
    channel_size: usize,
) -> GameHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = GameActor {
        game_id,
        machine,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    GameHandle {
        game_id,
        sender: tx,
    }
}
