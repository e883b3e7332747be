//! Badminton doubles scheduler: roster models, matchup generation and roster storage.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    generate_schedule, generate_schedule_seeded, schedule_rows, GroupScorer, History,
    MatchupGenerator, ScheduleRow, WeightedScorer, BYE_LABEL,
};
pub use models::{
    clean_name, CourtMatch, CourtPolicy, GameMatch, Player, PlayerId, PlayerStatus, Roster,
    RosterError, RosterRow, Round, Schedule, ScheduleConfig, ScheduleError, SplitStrategy, Team,
    DEFAULT_TRIALS, MAX_COURTS, MAX_ROUNDS,
};
pub use store::{
    CsvRosterStore, CsvScheduleSink, MemoryRosterStore, MemoryScheduleSink, RosterStore,
    ScheduleSink, StoreError,
};
