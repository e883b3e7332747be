//! Roster: the session's players and their store row shape.

use crate::models::player::{clean_name, Player, PlayerId, PlayerStatus};
use serde::{Deserialize, Serialize};

/// Errors that can occur while editing the roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Name is empty after trimming and dropping non-printable characters.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// No player with this id on the roster.
    PlayerNotFound(PlayerId),
    /// Rounds are 1-based, so a player cannot leave after round 0.
    InvalidDepartureRound,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyName => write!(f, "Player name is empty"),
            RosterError::DuplicatePlayerName(name) => {
                write!(f, "A player named '{}' already exists", name)
            }
            RosterError::PlayerNotFound(_) => write!(f, "Player not found"),
            RosterError::InvalidDepartureRound => write!(f, "Departure round must be at least 1"),
        }
    }
}

impl std::error::Error for RosterError {}

/// One row of the roster table as the store keeps it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "EarlyLeave", default, deserialize_with = "lenient_flag")]
    pub early_leave: bool,
    #[serde(rename = "LeaveAfterRound", default, deserialize_with = "csv::invalid_option")]
    pub leave_after_round: Option<u32>,
    #[serde(rename = "Status", default, deserialize_with = "csv::invalid_option")]
    pub status: Option<PlayerStatus>,
}

/// Spreadsheet exports write booleans as TRUE/FALSE, yes/no, 1/0 or leave them blank.
fn lenient_flag<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(d)?;
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "x"
    ))
}

impl RosterRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Ordered list of players for one session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from store rows. Rows whose cleaned name is empty or already taken are
    /// skipped. Ids are assigned fresh; they are not part of the stored row.
    pub fn from_rows(rows: Vec<RosterRow>) -> Self {
        let mut roster = Self::new();
        for row in rows {
            let status = row.status.unwrap_or_default();
            match roster.add_player(&row.name, row.early_leave, row.leave_after_round) {
                Ok(id) => {
                    if let Some(p) = roster.get_player_mut(id) {
                        p.status = status;
                    }
                }
                Err(e) => log::warn!("Skipping roster row '{}': {}", row.name, e),
            }
        }
        roster
    }

    pub fn to_rows(&self) -> Vec<RosterRow> {
        self.players
            .iter()
            .map(|p| RosterRow {
                name: p.name.clone(),
                early_leave: p.early_leave,
                leave_after_round: p.leave_after_round,
                status: Some(p.status),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Add an attending player. The name is sanitized first and must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: &str,
        early_leave: bool,
        leave_after_round: Option<u32>,
    ) -> Result<PlayerId, RosterError> {
        let name = clean_name(name);
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if leave_after_round == Some(0) {
            return Err(RosterError::InvalidDepartureRound);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.to_lowercase() == name.to_lowercase());
        if is_duplicate {
            return Err(RosterError::DuplicatePlayerName(name));
        }
        let mut player = Player::new(name);
        player.early_leave = early_leave || leave_after_round.is_some();
        player.leave_after_round = leave_after_round;
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(RosterError::PlayerNotFound(player_id))?;
        Ok(self.players.remove(idx))
    }

    pub fn set_status(
        &mut self,
        player_id: PlayerId,
        status: PlayerStatus,
    ) -> Result<(), RosterError> {
        let p = self
            .get_player_mut(player_id)
            .ok_or(RosterError::PlayerNotFound(player_id))?;
        p.status = status;
        Ok(())
    }

    /// Set or clear the round after which a player leaves. Clearing also clears the early-leave flag.
    pub fn set_departure(
        &mut self,
        player_id: PlayerId,
        leave_after_round: Option<u32>,
    ) -> Result<(), RosterError> {
        if leave_after_round == Some(0) {
            return Err(RosterError::InvalidDepartureRound);
        }
        let p = self
            .get_player_mut(player_id)
            .ok_or(RosterError::PlayerNotFound(player_id))?;
        p.leave_after_round = leave_after_round;
        p.early_leave = leave_after_round.is_some();
        Ok(())
    }

    /// Attending players in roster order: the input to matchup generation.
    pub fn attending(&self) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.is_attending())
            .cloned()
            .collect()
    }
}
