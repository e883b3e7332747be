//! In-memory store and sink, for tests and for running without a roster file.

use super::{RosterStore, ScheduleSink, StoreError};
use crate::logic::ScheduleRow;
use crate::models::RosterRow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Roster rows held in memory. Can be switched offline to act like an unreachable store.
#[derive(Debug)]
pub struct MemoryRosterStore {
    rows: Mutex<Vec<RosterRow>>,
    online: AtomicBool,
}

impl Default for MemoryRosterStore {
    fn default() -> Self {
        Self::with_rows(Vec::new())
    }
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RosterRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            online: AtomicBool::new(true),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("store is offline".to_string()))
        }
    }
}

impl RosterStore for MemoryRosterStore {
    fn create_if_absent(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    fn load(&self) -> Result<Vec<RosterRow>, StoreError> {
        self.check_online()?;
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        Ok(rows.clone())
    }

    fn save(&self, rows: &[RosterRow]) -> Result<(), StoreError> {
        self.check_online()?;
        let mut g = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        *g = rows.to_vec();
        Ok(())
    }
}

/// Keeps the last schedule written.
#[derive(Debug, Default)]
pub struct MemoryScheduleSink {
    rows: Mutex<Vec<ScheduleRow>>,
}

impl MemoryScheduleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of the last schedule written (empty if none, or if the lock is poisoned).
    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.rows.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl ScheduleSink for MemoryScheduleSink {
    fn write(&self, rows: &[ScheduleRow]) -> Result<(), StoreError> {
        let mut g = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        *g = rows.to_vec();
        Ok(())
    }
}
