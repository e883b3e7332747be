//! Tabular view of a schedule: one row per court, plus a BYE row per round.

use crate::models::{Player, PlayerId, Round, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Court label used for players sitting out.
pub const BYE_LABEL: &str = "BYE";

/// One display row of a schedule, as written to a sink.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "Round")]
    pub round: u32,
    #[serde(rename = "Court")]
    pub court: String,
    #[serde(rename = "Team 1")]
    pub team_1: String,
    #[serde(rename = "Team 2")]
    pub team_2: String,
}

/// Flatten rounds into display rows, grouped by round in court order.
///
/// Teams render as `"A & B"`. A non-empty bye renders as a `BYE` row listing the resting
/// players comma-separated, with an empty second team. Ids missing from `players` render as `?`.
pub fn schedule_rows(rounds: &[Round], players: &[Player]) -> Vec<ScheduleRow> {
    let names: HashMap<PlayerId, &str> = players.iter().map(|p| (p.id, p.name.as_str())).collect();
    let name = |id: &PlayerId| names.get(id).copied().unwrap_or("?");
    let team = |t: Team| {
        let [a, b] = t.players();
        format!("{} & {}", name(&a), name(&b))
    };

    let mut rows = Vec::new();
    for round in rounds {
        for m in &round.matches {
            rows.push(ScheduleRow {
                round: round.number,
                court: m.court.to_string(),
                team_1: team(m.game.team_1()),
                team_2: team(m.game.team_2()),
            });
        }
        if !round.bye.is_empty() {
            rows.push(ScheduleRow {
                round: round.number,
                court: BYE_LABEL.to_string(),
                team_1: round.bye.iter().map(name).collect::<Vec<_>>().join(", "),
                team_2: String::new(),
            });
        }
    }
    rows
}
