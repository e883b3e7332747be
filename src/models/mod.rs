//! Data structures for the scheduler: players, roster, teams, matches, rounds and schedules.

mod game;
mod player;
mod roster;
mod schedule;

pub use game::{CourtMatch, GameMatch, Round, Team};
pub use player::{clean_name, Player, PlayerId, PlayerStatus};
pub use roster::{Roster, RosterError, RosterRow};
pub use schedule::{
    CourtPolicy, Schedule, ScheduleConfig, ScheduleError, SplitStrategy, DEFAULT_TRIALS,
    MAX_COURTS, MAX_ROUNDS,
};
