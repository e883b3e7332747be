//! Player data structure and display-name sanitization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams, matches and history lookups).
pub type PlayerId = Uuid;

/// Whether a player takes part in the current session.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Attending,
    Absent,
}

/// A player on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Cleaned display name; unique within a roster (case-insensitive).
    pub name: String,
    pub early_leave: bool,
    /// Last round this player can play. None means they stay for the whole session.
    pub leave_after_round: Option<u32>,
    pub status: PlayerStatus,
}

impl Player {
    /// Create an attending player with the given name and no departure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            early_leave: false,
            leave_after_round: None,
            status: PlayerStatus::Attending,
        }
    }

    /// Builder-style departure: the player leaves after `round`.
    pub fn leaving_after(mut self, round: u32) -> Self {
        self.early_leave = true;
        self.leave_after_round = Some(round);
        self
    }

    /// True if the player is still around in the given (1-based) round.
    pub fn is_active_in_round(&self, round: u32) -> bool {
        match self.leave_after_round {
            Some(last) => round <= last,
            None => true,
        }
    }

    pub fn is_attending(&self) -> bool {
        self.status == PlayerStatus::Attending
    }
}

/// Format (Cf) and private-use (Co) code points. Neither renders as a visible glyph.
const INVISIBLE_RANGES: &[(char, char)] = &[
    ('\u{00AD}', '\u{00AD}'),
    ('\u{0600}', '\u{0605}'),
    ('\u{061C}', '\u{061C}'),
    ('\u{06DD}', '\u{06DD}'),
    ('\u{070F}', '\u{070F}'),
    ('\u{0890}', '\u{0891}'),
    ('\u{08E2}', '\u{08E2}'),
    ('\u{180E}', '\u{180E}'),
    ('\u{200B}', '\u{200F}'),
    ('\u{202A}', '\u{202E}'),
    ('\u{2060}', '\u{2064}'),
    ('\u{2066}', '\u{206F}'),
    ('\u{E000}', '\u{F8FF}'),
    ('\u{FEFF}', '\u{FEFF}'),
    ('\u{FFF9}', '\u{FFFB}'),
    ('\u{110BD}', '\u{110BD}'),
    ('\u{110CD}', '\u{110CD}'),
    ('\u{13430}', '\u{1343F}'),
    ('\u{1BCA0}', '\u{1BCA3}'),
    ('\u{1D173}', '\u{1D17A}'),
    ('\u{E0001}', '\u{E0001}'),
    ('\u{E0020}', '\u{E007F}'),
    ('\u{F0000}', '\u{FFFFD}'),
    ('\u{100000}', '\u{10FFFD}'),
];

/// True for characters that print: no controls, no format or private-use code points, and no
/// separators other than the ASCII space.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !INVISIBLE_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Sanitize a display name: drop non-printable characters, then trim surrounding spaces.
pub fn clean_name(raw: &str) -> String {
    raw.chars()
        .filter(|&c| is_printable(c))
        .collect::<String>()
        .trim()
        .to_string()
}
