//! CSV files as row tables.

use super::{RosterStore, ScheduleSink, StoreError, ROSTER_COLUMNS, SCHEDULE_COLUMNS};
use crate::logic::ScheduleRow;
use crate::models::RosterRow;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Roster kept in a CSV file.
#[derive(Clone, Debug)]
pub struct CsvRosterStore {
    path: PathBuf,
}

impl CsvRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the table at `path`, creating it with just a header row if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.create_if_absent()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for CsvRosterStore {
    fn create_if_absent(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        log::info!("Creating roster table at {}", self.path.display());
        write_table::<RosterRow>(&self.path, &ROSTER_COLUMNS, &[])
    }

    fn load(&self) -> Result<Vec<RosterRow>, StoreError> {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(e) if is_not_found(&e) => {
                return Err(StoreError::Unavailable(format!(
                    "no roster table at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<RosterRow>, _>>()?;
        log::debug!("Loaded {} roster row(s) from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    fn save(&self, rows: &[RosterRow]) -> Result<(), StoreError> {
        write_table(&self.path, &ROSTER_COLUMNS, rows)?;
        log::debug!("Saved {} roster row(s) to {}", rows.len(), self.path.display());
        Ok(())
    }
}

/// Schedule rows written to a CSV file, replacing any previous schedule.
#[derive(Clone, Debug)]
pub struct CsvScheduleSink {
    path: PathBuf,
}

impl CsvScheduleSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScheduleSink for CsvScheduleSink {
    fn write(&self, rows: &[ScheduleRow]) -> Result<(), StoreError> {
        write_table(&self.path, &SCHEDULE_COLUMNS, rows)?;
        log::info!("Wrote {} schedule row(s) to {}", rows.len(), self.path.display());
        Ok(())
    }
}

fn is_not_found(e: &csv::Error) -> bool {
    matches!(e.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound)
}

/// Write header plus rows to a sibling temp file, then move it over `path`.
fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
