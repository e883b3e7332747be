//! Scheduling logic: pairing history, scoring, matchup generation and display rows.

mod history;
mod matchups;
mod rows;
mod scoring;

pub use history::History;
pub use matchups::{generate_schedule, generate_schedule_seeded, MatchupGenerator};
pub use rows::{schedule_rows, ScheduleRow, BYE_LABEL};
pub use scoring::{GroupScorer, WeightedScorer};
