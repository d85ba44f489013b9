//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::GameError;

/// Configuration for one game instance.
///
/// The two quota values share one interpretation (see [`quota`](crate::quota)):
/// - `<= 0` → exactly one role-holder,
/// - in `(0, 1)` → that proportion of the roster,
/// - `>= 1` → that many players, capped at the roster size.
///
/// If both quotas are proportions they must not add up to more than 1.0.
/// The machine does not enforce this while processing events; call
/// [`validate`](Self::validate) when the configuration is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Murderer quota value.
    pub murderer_number: f64,

    /// Hunter quota value. Hunters are drawn from the non-murderers.
    pub hunter_number: f64,

    /// Scrap items spawned when a round activates.
    pub scrap_count: usize,

    /// How many times a spawn request is tried before giving up.
    pub spawn_attempts: u32,

    /// Declare a winner automatically once eliminations decide the round.
    pub auto_declare_victory: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            murderer_number: 0.0,
            hunter_number: 0.0,
            scrap_count: 0,
            spawn_attempts: 3,
            auto_declare_victory: true,
        }
    }
}

impl GameConfig {
    /// Checks the configuration for caller errors.
    ///
    /// # Errors
    /// [`GameError::InvalidConfig`] when a quota is NaN or infinite,
    /// `spawn_attempts` is zero, or both quotas are proportions whose sum
    /// exceeds 1.0.
    pub fn validate(&self) -> Result<(), GameError> {
        for (name, value) in [
            ("murderer_number", self.murderer_number),
            ("hunter_number", self.hunter_number),
        ] {
            if !value.is_finite() {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        let is_fraction = |v: f64| v > 0.0 && v < 1.0;
        if is_fraction(self.murderer_number)
            && is_fraction(self.hunter_number)
            && self.murderer_number + self.hunter_number > 1.0
        {
            return Err(GameError::InvalidConfig(format!(
                "murderer_number ({}) + hunter_number ({}) exceeds 1.0",
                self.murderer_number, self.hunter_number
            )));
        }

        if self.spawn_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "spawn_attempts must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
