//! Scoring of candidate matches. Lower is better.

use crate::logic::history::History;
use crate::models::GameMatch;

/// Scores a candidate match against the history built so far.
pub trait GroupScorer {
    fn score(&self, candidate: &GameMatch, history: &History, round: u32, min_rest: u32) -> u32;
}

/// Weighted penalty for repeated partners, repeated matchups and short rests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeightedScorer {
    /// Per previous occurrence of each team in the candidate.
    pub teammate_weight: u32,
    /// Per previous occurrence of the exact matchup.
    pub match_weight: u32,
    /// Flat penalty per player who has not rested long enough.
    pub rest_penalty: u32,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self {
            teammate_weight: 10,
            match_weight: 5,
            rest_penalty: 1000,
        }
    }
}

impl WeightedScorer {
    /// Every repeat counts the same.
    pub fn uniform() -> Self {
        Self {
            teammate_weight: 1,
            match_weight: 1,
            ..Self::default()
        }
    }
}

impl GroupScorer for WeightedScorer {
    fn score(&self, candidate: &GameMatch, history: &History, round: u32, min_rest: u32) -> u32 {
        let teammate: u32 = candidate
            .teams()
            .iter()
            .map(|t| history.teammate_count(t))
            .sum();
        let rested_too_little = candidate
            .players()
            .iter()
            .filter(|&&id| history.violates_rest(id, round, min_rest))
            .count() as u32;
        self.teammate_weight
            .saturating_mul(teammate)
            .saturating_add(self.match_weight.saturating_mul(history.match_count(candidate)))
            .saturating_add(self.rest_penalty.saturating_mul(rested_too_little))
    }
}
