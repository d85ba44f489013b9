//! Players and spectators of one game instance.

use std::collections::HashSet;

use murder_protocol::PlayerId;

/// The two disjoint membership sets of a game instance.
///
/// Invariant: no id is ever in both `players` and `spectators`. Each
/// insertion removes the id from the other set first.
///
/// The roster does not know about phases; the state machine decides when
/// [`add_player`](Self::add_player) may be called.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: HashSet<PlayerId>,
    spectators: HashSet<PlayerId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role-eligible player, moving them out of the spectators.
    ///
    /// `None` (an unresolvable token) is a silent no-op. Returns `true` if
    /// the roster changed.
    pub fn add_player(&mut self, player: Option<PlayerId>) -> bool {
        let Some(player) = player else {
            return false;
        };
        let was_spectating = self.spectators.remove(&player);
        self.players.insert(player) || was_spectating
    }

    /// Adds a spectator, moving them out of the players.
    ///
    /// Same `None` handling as [`add_player`](Self::add_player).
    pub fn add_spectator(&mut self, spectator: Option<PlayerId>) -> bool {
        let Some(spectator) = spectator else {
            return false;
        };
        let was_playing = self.players.remove(&spectator);
        self.spectators.insert(spectator) || was_playing
    }

    /// Empties both sets.
    pub fn clear(&mut self) {
        self.players.clear();
        self.spectators.clear();
    }

    pub fn players(&self) -> &HashSet<PlayerId> {
        &self.players
    }

    pub fn spectators(&self) -> &HashSet<PlayerId> {
        &self.spectators
    }

    pub fn is_player(&self, id: &PlayerId) -> bool {
        self.players.contains(id)
    }

    pub fn is_spectator(&self, id: &PlayerId) -> bool {
        self.spectators.contains(id)
    }

    /// Players sorted by id, for anything that must not depend on hash order.
    pub fn sorted_players(&self) -> Vec<PlayerId> {
        let mut players: Vec<_> = self.players.iter().copied().collect();
        players.sort_unstable();
        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn assert_disjoint(roster: &Roster) {
        assert!(
            roster.players().is_disjoint(roster.spectators()),
            "players and spectators overlap"
        );
    }

    #[test]
    fn test_add_player_none_is_noop() {
        let mut roster = Roster::new();
        assert!(!roster.add_player(None));
        assert!(!roster.add_spectator(None));
        assert!(roster.players().is_empty());
        assert!(roster.spectators().is_empty());
    }

    #[test]
    fn test_add_player_twice_reports_no_change() {
        let mut roster = Roster::new();
        assert!(roster.add_player(Some(pid(1))));
        assert!(!roster.add_player(Some(pid(1))));
        assert_eq!(roster.players().len(), 1);
    }

    #[test]
    fn test_spectator_becomes_player() {
        let mut roster = Roster::new();
        roster.add_spectator(Some(pid(1)));

        assert!(roster.add_player(Some(pid(1))));

        assert!(roster.is_player(&pid(1)));
        assert!(!roster.is_spectator(&pid(1)));
        assert_disjoint(&roster);
    }

    #[test]
    fn test_player_becomes_spectator() {
        let mut roster = Roster::new();
        roster.add_player(Some(pid(1)));
        roster.add_player(Some(pid(2)));

        assert!(roster.add_spectator(Some(pid(1))));

        assert!(roster.is_spectator(&pid(1)));
        assert!(!roster.is_player(&pid(1)));
        assert!(roster.is_player(&pid(2)));
        assert_disjoint(&roster);
    }

    #[test]
    fn test_clear_empties_both_sets() {
        let mut roster = Roster::new();
        roster.add_player(Some(pid(1)));
        roster.add_spectator(Some(pid(2)));

        roster.clear();

        assert!(roster.players().is_empty());
        assert!(roster.spectators().is_empty());
    }

    #[test]
    fn test_sorted_players() {
        let mut roster = Roster::new();
        for id in [5, 1, 3] {
            roster.add_player(Some(pid(id)));
        }
        assert_eq!(roster.sorted_players(), vec![pid(1), pid(3), pid(5)]);
    }
}
