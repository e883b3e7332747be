//! Pairing history for one multi-round generation call.

use crate::models::{GameMatch, PlayerId, Team};
use std::collections::HashMap;

/// Counts of past teammates and matchups, plus the last round each player was on court.
///
/// Lives only as long as one schedule is being built; it is never persisted.
#[derive(Clone, Debug, Default)]
pub struct History {
    teammate_count: HashMap<Team, u32>,
    match_count: HashMap<GameMatch, u32>,
    last_played_round: HashMap<PlayerId, u32>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times this pair has played as partners so far.
    pub fn teammate_count(&self, team: &Team) -> u32 {
        self.teammate_count.get(team).copied().unwrap_or(0)
    }

    /// Times these two teams have faced each other so far.
    pub fn match_count(&self, game: &GameMatch) -> u32 {
        self.match_count.get(game).copied().unwrap_or(0)
    }

    pub fn last_played(&self, id: PlayerId) -> Option<u32> {
        self.last_played_round.get(&id).copied()
    }

    /// Full rounds sat out since the player last played, as seen from `round`.
    /// None if they have not played yet.
    pub fn rounds_waited(&self, id: PlayerId, round: u32) -> Option<u32> {
        self.last_played(id)
            .map(|last| round.saturating_sub(last).saturating_sub(1))
    }

    /// True if the player played too recently to be picked again in `round`.
    pub fn violates_rest(&self, id: PlayerId, round: u32, min_rest: u32) -> bool {
        if min_rest == 0 {
            return false;
        }
        match self.rounds_waited(id, round) {
            Some(waited) => waited < min_rest,
            None => false,
        }
    }

    /// Commit a match played in `round`.
    pub fn record(&mut self, game: &GameMatch, round: u32) {
        for team in game.teams() {
            *self.teammate_count.entry(team).or_insert(0) += 1;
        }
        *self.match_count.entry(*game).or_insert(0) += 1;
        for id in game.players() {
            self.last_played_round.insert(id, round);
        }
    }

    /// Sum of teammate repeats: for every pair, plays beyond the first.
    pub fn repeated_teams(&self) -> u32 {
        self.teammate_count.values().map(|c| c.saturating_sub(1)).sum()
    }

    /// Sum of matchup repeats: for every pair of teams, meetings beyond the first.
    pub fn repeated_matches(&self) -> u32 {
        self.match_count.values().map(|c| c.saturating_sub(1)).sum()
    }
}
