use std::sync::{Arc, Mutex, RwLock};

use murder::prelude::*;

const CONFIG: &str = r#"{
    "murderer_number": 1,
    "hunter_number": 0.25,
    "scrap_count": 3
}"#;

// ---------------------------------------------------------------------------
// Arena mode
// ---------------------------------------------------------------------------

/// A single-map mode: spawn points are handed out round-robin and the
/// assignment is published to whoever holds `reveal`.
struct ArenaMode {
    spawns: Vec<Location>,
    scrap: Vec<Location>,
    next_spawn: usize,
    next_scrap: usize,
    reveal: Arc<Mutex<Option<RoleAssignment>>>,
}

impl ArenaMode {
    fn new(reveal: Arc<Mutex<Option<RoleAssignment>>>) -> Self {
        Self {
            spawns: vec![
                Location::new("manor", 12.5, 70.0, -4.0),
                Location::new("manor", -20.0, 70.0, 8.5),
                Location::new("manor", 3.0, 82.0, 30.0),
            ],
            scrap: vec![
                Location::new("manor", 0.0, 70.0, 0.0),
                Location::new("manor", 15.0, 64.0, 15.0),
            ],
            next_spawn: 0,
            next_scrap: 0,
            reveal,
        }
    }
}

fn cycle(points: &[Location], next: &mut usize) -> Option<Location> {
    if points.is_empty() {
        return None;
    }
    let point = points[*next % points.len()].clone();
    *next += 1;
    Some(point)
}

impl GameMode for ArenaMode {
    fn random_player_spawn(&mut self) -> Result<Location, GameError> {
        cycle(&self.spawns, &mut self.next_spawn)
            .ok_or(GameError::NoSpawnAvailable(SpawnKind::Player))
    }

    fn random_scrap_spawn(&mut self) -> Result<Location, GameError> {
        cycle(&self.scrap, &mut self.next_scrap)
            .ok_or(GameError::NoSpawnAvailable(SpawnKind::Scrap))
    }

    fn lobby_to_game(&mut self, roster: &Roster) -> Result<(), GameError> {
        tracing::info!(players = roster.players().len(), "loading manor");
        Ok(())
    }

    fn back_to_lobby(&mut self) -> Result<(), GameError> {
        self.next_spawn = 0;
        self.next_scrap = 0;
        tracing::info!("lobby ready");
        Ok(())
    }

    fn roles_assigned(&mut self, round: &Round) {
        for (player, location) in &round.spawns {
            tracing::info!(player_id = %player, %location, "teleported");
        }
        if let Ok(mut slot) = self.reveal.lock() {
            *slot = Some(round.assignment.clone());
        }
    }

    fn round_finished(&mut self, record: &RoundRecord) {
        tracing::info!(
            round = record.number,
            outcome = %record.outcome,
            eliminated = record.eliminated.len(),
            "results broadcast"
        );
    }
}

// ---------------------------------------------------------------------------
// Scripted round
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    murder::logging::init();

    let config: GameConfig = serde_json::from_str(CONFIG)?;
    config.validate()?;

    let online = Arc::new(RwLock::new(OnlinePlayers::new()));
    for (id, name) in (1..).zip(["Ada", "Brook", "Cyd", "Dex", "Eve"]) {
        online
            .write()
            .map_err(|_| "player registry poisoned")?
            .connect(PlayerId(id), name)?;
    }

    let reveal = Arc::new(Mutex::new(None));
    let mut games = GameManager::new();
    let game = games.create_game(GameStateMachine::new(
        ArenaMode::new(Arc::clone(&reveal)),
        Arc::clone(&online),
        config,
    ));

    for name in ["ada", "brook", "cyd", "dex"] {
        games.deliver(game, Event::parse("ADD_PLAYER", [name])?).await?;
    }
    games.deliver(game, Event::parse("ADD_SPECTATOR", ["eve"])?).await?;
    games.deliver(game, Event::bare(EventKind::GameStart)).await?;
    games.deliver(game, Event::bare(EventKind::Activate)).await?;

    let assignment = reveal
        .lock()
        .map_err(|_| "assignment poisoned")?
        .clone()
        .ok_or("round did not start")?;

    for murderer in &assignment.murderers {
        let dispatch = games
            .deliver(game, Event::for_player(EventKind::EliminatePlayer, murderer.to_string()))
            .await?;
        tracing::info!(player_id = %murderer, ?dispatch, "murderer caught");
    }

    let info = games.game_info(game).await?;
    tracing::info!(phase = %info.phase, rounds = info.rounds_played, "round over");

    games.deliver(game, Event::bare(EventKind::ReturnToLobby)).await?;
    let info = games.game_info(game).await?;
    tracing::info!(
        phase = %info.phase,
        players = info.player_count,
        spectators = info.spectator_count,
        "back in the lobby"
    );

    games.destroy_game(game).await?;
    Ok(())
}
