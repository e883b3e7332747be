//! Team, GameMatch and Round for doubles play.
//!
//! Teams and matches are stored in canonical (sorted) form so that swapping partners or
//! swapping sides never creates a distinct history entry.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Two partners playing on the same side. `Team::new(a, b) == Team::new(b, a)`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Team {
    first: PlayerId,
    second: PlayerId,
}

impl Team {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        debug_assert_ne!(a, b, "a team needs two distinct players");
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.first == id || self.second == id
    }
}

/// Two teams facing each other. Which side is "team 1" carries no meaning.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GameMatch {
    team_1: Team,
    team_2: Team,
}

impl GameMatch {
    pub fn new(a: Team, b: Team) -> Self {
        if a <= b {
            Self { team_1: a, team_2: b }
        } else {
            Self { team_1: b, team_2: a }
        }
    }

    pub fn team_1(&self) -> Team {
        self.team_1
    }

    pub fn team_2(&self) -> Team {
        self.team_2
    }

    pub fn teams(&self) -> [Team; 2] {
        [self.team_1, self.team_2]
    }

    pub fn players(&self) -> [PlayerId; 4] {
        let [a, b] = self.team_1.players();
        let [c, d] = self.team_2.players();
        [a, b, c, d]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.team_1.contains(id) || self.team_2.contains(id)
    }
}

/// A match bound to a court within a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtMatch {
    /// 1-based court number.
    pub court: u32,
    /// 1-based batch; only goes above 1 when courts are reused within a round.
    pub batch: u32,
    pub game: GameMatch,
}

/// One scheduling pass: matches by court plus everyone sitting out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub number: u32,
    pub matches: Vec<CourtMatch>,
    /// Players sitting out this round (may be empty).
    pub bye: Vec<PlayerId>,
}

impl Round {
    /// All players assigned in this round, matches first then bye, in court order.
    pub fn participants(&self) -> Vec<PlayerId> {
        self.matches
            .iter()
            .flat_map(|m| m.game.players())
            .chain(self.bye.iter().copied())
            .collect()
    }

    pub fn is_bye_only(&self) -> bool {
        self.matches.is_empty()
    }
}
