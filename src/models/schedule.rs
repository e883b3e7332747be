//! Schedule configuration and the generated schedule.

use crate::models::game::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Most rounds a caller may request in one schedule.
pub const MAX_ROUNDS: u32 = 20;
/// Most courts a caller may request.
pub const MAX_COURTS: u32 = 10;
/// Default number of candidate groups tried per court.
pub const DEFAULT_TRIALS: usize = 50;

/// Errors for schedule requests that fall outside the supported bounds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    InvalidRounds(u32),
    InvalidCourts(u32),
    NoTrials,
    /// No attending players to schedule.
    NoPlayers,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidRounds(n) => {
                write!(f, "Rounds must be between 1 and {} (got {})", MAX_ROUNDS, n)
            }
            ScheduleError::InvalidCourts(n) => {
                write!(f, "Courts must be between 1 and {} (got {})", MAX_COURTS, n)
            }
            ScheduleError::NoTrials => write!(f, "Search needs at least one trial per court"),
            ScheduleError::NoPlayers => write!(f, "No players yet. Add players to the roster first"),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// How court numbers are handed out within a round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtPolicy {
    /// At most one match per court each round; everyone else sits out.
    #[default]
    SingleBatch,
    /// Keep forming matches while four players remain; courts cycle 1..=num_courts and each
    /// wrap starts a new batch.
    CycleBatches,
}

/// How a candidate group of four is split into two teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Only the split induced by the sampled order: (0,1) vs (2,3).
    #[default]
    Induced,
    /// Score all three 2-2 splits and keep the best.
    AllSplits,
}

/// Options for one generation call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub num_rounds: u32,
    pub num_courts: u32,
    /// Rounds a player should sit out before being picked again. 0 disables the rest rule.
    #[serde(default)]
    pub min_rest: u32,
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default)]
    pub court_policy: CourtPolicy,
    #[serde(default)]
    pub split: SplitStrategy,
}

fn default_trials() -> usize {
    DEFAULT_TRIALS
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl ScheduleConfig {
    pub fn new(num_rounds: u32, num_courts: u32) -> Self {
        Self {
            num_rounds,
            num_courts,
            min_rest: 0,
            trials: DEFAULT_TRIALS,
            court_policy: CourtPolicy::SingleBatch,
            split: SplitStrategy::Induced,
        }
    }

    pub fn with_min_rest(mut self, min_rest: u32) -> Self {
        self.min_rest = min_rest;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_court_policy(mut self, policy: CourtPolicy) -> Self {
        self.court_policy = policy;
        self
    }

    pub fn with_split(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    /// Check caller-facing bounds. The generator itself accepts anything.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !(1..=MAX_ROUNDS).contains(&self.num_rounds) {
            return Err(ScheduleError::InvalidRounds(self.num_rounds));
        }
        if !(1..=MAX_COURTS).contains(&self.num_courts) {
            return Err(ScheduleError::InvalidCourts(self.num_courts));
        }
        if self.trials == 0 {
            return Err(ScheduleError::NoTrials);
        }
        Ok(())
    }
}

/// A generated schedule with the options it was built from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: ScheduleConfig,
    pub rounds: Vec<Round>,
}

impl Schedule {
    pub fn new(config: ScheduleConfig, rounds: Vec<Round>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            config,
            rounds,
        }
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }
}
