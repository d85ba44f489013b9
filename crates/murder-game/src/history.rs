//! Round-persistent data: results that survive a return to the lobby.
//!
//! `RETURN_TO_LOBBY` keeps the history; `GAME_RESET` wipes it.

use murder_protocol::PlayerId;
use serde::{Deserialize, Serialize};

use crate::{Outcome, Round};

/// The result of one finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub number: u32,
    pub outcome: Outcome,
    pub murderers: Vec<PlayerId>,
    pub hunters: Vec<PlayerId>,
    pub innocents: Vec<PlayerId>,
    /// Eliminated players, sorted by id.
    pub eliminated: Vec<PlayerId>,
}

impl RoundRecord {
    pub fn from_round(round: &Round, outcome: Outcome) -> Self {
        let mut eliminated: Vec<_> = round.eliminated.iter().copied().collect();
        eliminated.sort_unstable();
        Self {
            number: round.number,
            outcome,
            murderers: round.assignment.murderers.clone(),
            hunters: round.assignment.hunters.clone(),
            innocents: round.assignment.innocents.clone(),
            eliminated,
        }
    }

    /// Whether `player` took part and ended on the winning side.
    /// Hunters win with the innocents.
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self.outcome {
            Outcome::MurdererVictory => self.murderers.contains(player),
            Outcome::InnocentVictory => {
                self.hunters.contains(player) || self.innocents.contains(player)
            }
        }
    }
}

/// Every finished round since the last hard reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHistory {
    records: Vec<RoundRecord>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn rounds_played(&self) -> usize {
        self.records.len()
    }

    /// Number the next round will carry (1-based).
    pub fn next_round_number(&self) -> u32 {
        self.records.last().map_or(1, |r| r.number + 1)
    }

    pub fn innocent_wins(&self) -> usize {
        self.count(Outcome::InnocentVictory)
    }

    pub fn murderer_wins(&self) -> usize {
        self.count(Outcome::MurdererVictory)
    }

    /// Rounds `player` finished on the winning side.
    pub fn wins_for(&self, player: &PlayerId) -> usize {
        self.records.iter().filter(|r| r.is_winner(player)).count()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoleAssignment;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn finished(number: u32, outcome: Outcome) -> RoundRecord {
        let mut round = Round::new(
            number,
            RoleAssignment {
                murderers: vec![pid(1)],
                hunters: vec![pid(2)],
                innocents: vec![pid(3), pid(4)],
            },
        );
        round.eliminate(pid(4));
        round.eliminate(pid(3));
        RoundRecord::from_round(&round, outcome)
    }

    #[test]
    fn test_record_from_round() {
        let record = finished(3, Outcome::MurdererVictory);
        assert_eq!(record.number, 3);
        assert_eq!(record.murderers, vec![pid(1)]);
        assert_eq!(record.eliminated, vec![pid(3), pid(4)]);
    }

    #[test]
    fn test_is_winner() {
        let murderers_won = finished(1, Outcome::MurdererVictory);
        assert!(murderers_won.is_winner(&pid(1)));
        assert!(!murderers_won.is_winner(&pid(2)));

        let innocents_won = finished(1, Outcome::InnocentVictory);
        assert!(!innocents_won.is_winner(&pid(1)));
        assert!(innocents_won.is_winner(&pid(2)));
        assert!(innocents_won.is_winner(&pid(3)));
        assert!(!innocents_won.is_winner(&pid(99)), "non-participant");
    }

    #[test]
    fn test_history_counters() {
        let mut history = RoundHistory::new();
        assert_eq!(history.next_round_number(), 1);

        history.record(finished(1, Outcome::InnocentVictory));
        history.record(finished(2, Outcome::MurdererVictory));
        history.record(finished(3, Outcome::InnocentVictory));

        assert_eq!(history.rounds_played(), 3);
        assert_eq!(history.innocent_wins(), 2);
        assert_eq!(history.murderer_wins(), 1);
        assert_eq!(history.next_round_number(), 4);
        assert_eq!(history.wins_for(&pid(1)), 1);
        assert_eq!(history.wins_for(&pid(3)), 2);
        assert_eq!(history.last().map(|r| r.number), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut history = RoundHistory::new();
        history.record(finished(1, Outcome::InnocentVictory));
        history.clear();
        assert_eq!(history.rounds_played(), 0);
        assert_eq!(history.next_round_number(), 1);
    }
}
