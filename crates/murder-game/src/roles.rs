//! Role quotas and random role assignment.

use std::collections::HashSet;
use std::fmt;

use murder_protocol::PlayerId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Turns a configured quota value into a head count for a roster of
/// `roster_size` players.
///
/// - empty roster → 0
/// - `value <= 0` (or NaN) → 1
/// - `0 < value < 1` → `value × roster_size` rounded half away from zero,
///   clamped to `[1, roster_size]`
/// - `value >= 1` → `floor(value)`, capped at `roster_size`
pub fn quota(roster_size: usize, value: f64) -> usize {
    if roster_size == 0 {
        return 0;
    }
    if value.is_nan() || value <= 0.0 {
        return 1;
    }
    if value < 1.0 {
        let scaled = (value * roster_size as f64).round() as usize;
        return scaled.clamp(1, roster_size);
    }
    // `as` saturates, so +inf lands on usize::MAX and is capped below.
    (value.floor() as usize).min(roster_size)
}

/// The role a player holds for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Murderer,
    Hunter,
    Innocent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Murderer => write!(f, "murderer"),
            Self::Hunter => write!(f, "hunter"),
            Self::Innocent => write!(f, "innocent"),
        }
    }
}

/// A partition of a roster into the three roles. Each group is sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub murderers: Vec<PlayerId>,
    pub hunters: Vec<PlayerId>,
    pub innocents: Vec<PlayerId>,
}

impl RoleAssignment {
    pub fn role_of(&self, player: &PlayerId) -> Option<Role> {
        if self.murderers.contains(player) {
            Some(Role::Murderer)
        } else if self.hunters.contains(player) {
            Some(Role::Hunter)
        } else if self.innocents.contains(player) {
            Some(Role::Innocent)
        } else {
            None
        }
    }

    /// Every player holding a role.
    pub fn participants(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.murderers
            .iter()
            .chain(&self.hunters)
            .chain(&self.innocents)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.murderers.len() + self.hunters.len() + self.innocents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Draws role assignments uniformly at random.
///
/// Owns its generator so tests can inject a seeded one and get the same
/// assignment every run.
#[derive(Debug, Clone)]
pub struct RoleAssigner {
    rng: StdRng,
}

impl RoleAssigner {
    /// An assigner seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible assigner.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Partitions `players` into murderers, hunters and innocents.
    ///
    /// Murderers get `min(murderer_quota, n)` seats, hunters
    /// `min(hunter_quota, n - murderers)`, innocents the rest. Each seat is
    /// a uniform draw without replacement, so no player holds two roles.
    ///
    /// # Errors
    /// [`GameError::InsufficientPlayers`] if `players` is empty.
    pub fn assign(
        &mut self,
        players: &HashSet<PlayerId>,
        murderer_quota: usize,
        hunter_quota: usize,
    ) -> Result<RoleAssignment, GameError> {
        if players.is_empty() {
            return Err(GameError::InsufficientPlayers);
        }

        // Sort before shuffling: the draw must depend only on the rng,
        // never on hash iteration order.
        let mut pool: Vec<PlayerId> = players.iter().copied().collect();
        pool.sort_unstable();
        pool.shuffle(&mut self.rng);

        let murderer_count = murderer_quota.min(pool.len());
        let hunter_count = hunter_quota.min(pool.len() - murderer_count);

        let mut innocents = pool.split_off(murderer_count + hunter_count);
        let mut hunters = pool.split_off(murderer_count);
        let mut murderers = pool;

        murderers.sort_unstable();
        hunters.sort_unstable();
        innocents.sort_unstable();

        Ok(RoleAssignment {
            murderers,
            hunters,
            innocents,
        })
    }
}

impl Default for RoleAssigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn roster(n: u64) -> HashSet<PlayerId> {
        (1..=n).map(PlayerId).collect()
    }

    // =====================================================================
    // quota()
    // =====================================================================

    #[test]
    fn test_quota_non_positive_means_one() {
        assert_eq!(quota(10, 0.0), 1);
        assert_eq!(quota(10, -3.0), 1);
        assert_eq!(quota(10, f64::NAN), 1);
        assert_eq!(quota(0, 0.0), 0);
    }

    #[test]
    fn test_quota_proportional() {
        assert_eq!(quota(10, 0.5), 5);
        assert_eq!(quota(10, 0.25), 3, "2.5 rounds half away from zero");
        assert_eq!(quota(7, 0.3), 2);
    }

    #[test]
    fn test_quota_proportional_never_below_one_or_above_n() {
        assert_eq!(quota(3, 0.01), 1);
        assert_eq!(quota(3, 0.99), 3);
        for n in 1..=20 {
            for step in 1..100 {
                let q = quota(n, step as f64 / 100.0);
                assert!((1..=n).contains(&q), "quota({n}, {step}%) = {q}");
            }
        }
    }

    #[test]
    fn test_quota_absolute() {
        assert_eq!(quota(10, 3.0), 3);
        assert_eq!(quota(10, 3.9), 3);
        assert_eq!(quota(10, 1.0), 1);
        assert_eq!(quota(10, 20.0), 10);
        assert_eq!(quota(10, f64::INFINITY), 10);
    }

    // =====================================================================
    // RoleAssigner
    // =====================================================================

    #[test]
    fn test_assign_empty_roster_fails() {
        let mut assigner = RoleAssigner::seeded(1);
        let result = assigner.assign(&HashSet::new(), 1, 1);
        assert_eq!(result, Err(GameError::InsufficientPlayers));
    }

    #[test]
    fn test_assign_respects_quotas() {
        let mut assigner = RoleAssigner::seeded(7);
        let players = roster(10);

        let assignment = assigner.assign(&players, 2, 3).unwrap();

        assert_eq!(assignment.murderers.len(), 2);
        assert_eq!(assignment.hunters.len(), 3);
        assert_eq!(assignment.innocents.len(), 5);
        assert_eq!(assignment.len(), 10);
    }

    #[test]
    fn test_assign_groups_are_disjoint_and_cover_roster() {
        let mut assigner = RoleAssigner::seeded(11);
        let players = roster(8);

        let assignment = assigner.assign(&players, 3, 2).unwrap();

        let covered: HashSet<PlayerId> = assignment.participants().collect();
        assert_eq!(covered, players);
        assert_eq!(covered.len(), assignment.len(), "a player holds two roles");
    }

    #[test]
    fn test_assign_hunters_capped_by_remaining_players() {
        let mut assigner = RoleAssigner::seeded(3);
        let players = roster(2);

        let assignment = assigner.assign(&players, 5, 5).unwrap();

        assert_eq!(assignment.murderers.len(), 2);
        assert!(assignment.hunters.is_empty());
        assert!(assignment.innocents.is_empty());
    }

    #[test]
    fn test_assign_is_deterministic_for_a_seed() {
        let players = roster(12);
        let a = RoleAssigner::seeded(42).assign(&players, 2, 2).unwrap();
        let b = RoleAssigner::seeded(42).assign(&players, 2, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_assign_groups_sorted() {
        let mut assigner = RoleAssigner::seeded(5);
        let assignment = assigner.assign(&roster(9), 3, 3).unwrap();
        for group in [&assignment.murderers, &assignment.hunters, &assignment.innocents] {
            assert!(group.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_assign_every_player_gets_drawn() {
        // 4 players, 1 murderer, 400 draws: each player should be murderer
        // roughly 100 times. A generous bound keeps this stable.
        let mut assigner = RoleAssigner::seeded(2024);
        let players = roster(4);
        let mut counts: HashMap<PlayerId, u32> = HashMap::new();

        for _ in 0..400 {
            let assignment = assigner.assign(&players, 1, 0).unwrap();
            *counts.entry(assignment.murderers[0]).or_default() += 1;
        }

        for player in &players {
            let count = counts.get(player).copied().unwrap_or(0);
            assert!(count > 50, "{player} was murderer only {count} times");
        }
    }

    #[test]
    fn test_role_of() {
        let assignment = RoleAssignment {
            murderers: vec![PlayerId(1)],
            hunters: vec![PlayerId(2)],
            innocents: vec![PlayerId(3)],
        };
        assert_eq!(assignment.role_of(&PlayerId(1)), Some(Role::Murderer));
        assert_eq!(assignment.role_of(&PlayerId(2)), Some(Role::Hunter));
        assert_eq!(assignment.role_of(&PlayerId(3)), Some(Role::Innocent));
        assert_eq!(assignment.role_of(&PlayerId(4)), None);
    }
}
