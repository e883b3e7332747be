//! Roster storage and schedule sinks.
//!
//! The roster lives in a row-addressed table: a header row, then one row per player.
//! Generation never touches the store; callers load before and save after.

mod csv_table;
mod memory;

use crate::logic::ScheduleRow;
use crate::models::RosterRow;

pub use csv_table::{CsvRosterStore, CsvScheduleSink};
pub use memory::{MemoryRosterStore, MemoryScheduleSink};

/// Column names of the roster table, in order.
pub const ROSTER_COLUMNS: [&str; 4] = ["Name", "EarlyLeave", "LeaveAfterRound", "Status"];
/// Column names of the schedule table, in order.
pub const SCHEDULE_COLUMNS: [&str; 4] = ["Round", "Court", "Team 1", "Team 2"];

/// Errors from reading or writing a store. All of them mean "store unavailable" to callers.
#[derive(Debug)]
pub enum StoreError {
    /// The store refused or could not be reached.
    Unavailable(String),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(reason) => write!(f, "Store unavailable: {}", reason),
            StoreError::Io(e) => write!(f, "Store unavailable: {}", e),
            StoreError::Csv(e) => write!(f, "Store unavailable: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable(_) => None,
            StoreError::Io(e) => Some(e),
            StoreError::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e)
    }
}

/// Where the roster is kept.
pub trait RosterStore: Send + Sync {
    /// Make sure the roster table exists (with its header row).
    fn create_if_absent(&self) -> Result<(), StoreError>;

    /// All rows in table order.
    fn load(&self) -> Result<Vec<RosterRow>, StoreError>;

    /// Replace the table contents with `rows`.
    fn save(&self, rows: &[RosterRow]) -> Result<(), StoreError>;
}

/// Where generated schedules go.
pub trait ScheduleSink: Send + Sync {
    fn write(&self, rows: &[ScheduleRow]) -> Result<(), StoreError>;
}
