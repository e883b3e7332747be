//! Roster tables, schedule sinks and the tabular schedule view.

use badminton_scheduler::{
    generate_schedule_seeded, schedule_rows, CourtMatch, CsvRosterStore, CsvScheduleSink,
    GameMatch, MemoryRosterStore, MemoryScheduleSink, Player, PlayerStatus, Roster, RosterRow,
    RosterStore, Round, ScheduleConfig, ScheduleSink, StoreError, Team, BYE_LABEL,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("badminton-scheduler-{}", uuid::Uuid::new_v4()))
        .join(name)
}

#[test]
fn csv_store_creates_table_and_round_trips_rows() {
    let path = temp_path("roster.csv");
    let store = CsvRosterStore::open(&path).unwrap();
    assert!(store.path().exists());
    assert!(store.load().unwrap().is_empty());

    let mut roster = Roster::new();
    roster.add_player("Alice", false, None).unwrap();
    let bob = roster.add_player("Bob, Jr.", true, Some(4)).unwrap();
    roster.set_status(bob, PlayerStatus::Absent).unwrap();
    store.save(&roster.to_rows()).unwrap();

    let rows = store.load().unwrap();
    assert_eq!(rows, roster.to_rows());
    // opening again keeps the contents
    let reopened = CsvRosterStore::open(&path).unwrap();
    assert_eq!(reopened.load().unwrap().len(), 2);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Name,EarlyLeave,LeaveAfterRound,Status"));
}

#[test]
fn csv_store_reads_spreadsheet_style_values() {
    let path = temp_path("roster.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "Name,EarlyLeave\n Carol ,TRUE\nDave,\nErin,FALSE\n",
    )
    .unwrap();

    let rows = CsvRosterStore::new(&path).load().unwrap();
    let roster = Roster::from_rows(rows);
    let flags: Vec<(&str, bool)> = roster
        .players
        .iter()
        .map(|p| (p.name.as_str(), p.early_leave))
        .collect();
    assert_eq!(flags, vec![("Carol", true), ("Dave", false), ("Erin", false)]);
    assert!(roster.players.iter().all(|p| p.leave_after_round.is_none()));
    assert!(roster.players.iter().all(|p| p.is_attending()));
}

#[test]
fn missing_table_is_unavailable() {
    let store = CsvRosterStore::new(temp_path("missing.csv"));
    assert!(matches!(store.load(), Err(StoreError::Unavailable(_))));
}

#[test]
fn offline_store_fails_without_touching_rows() {
    let store = MemoryRosterStore::with_rows(vec![RosterRow::new("Alice")]);
    store.set_online(false);
    let err = store.save(&[]).unwrap_err();
    assert!(err.to_string().starts_with("Store unavailable"));
    assert!(store.load().is_err());

    store.set_online(true);
    assert_eq!(store.load().unwrap(), vec![RosterRow::new("Alice")]);
}

#[test]
fn rows_render_teams_and_bye() {
    let ps: Vec<Player> = ["Ann", "Ben", "Cat", "Dan", "Eve"]
        .iter()
        .map(|n| Player::new(*n))
        .collect();
    let game = GameMatch::new(Team::new(ps[0].id, ps[1].id), Team::new(ps[2].id, ps[3].id));
    let round = Round {
        number: 1,
        matches: vec![CourtMatch { court: 1, batch: 1, game }],
        bye: vec![ps[4].id],
    };
    let rows = schedule_rows(&[round], &ps);
    assert_eq!(rows.len(), 2);

    let mut teams = vec![rows[0].team_1.clone(), rows[0].team_2.clone()];
    teams.sort();
    for t in &teams {
        assert!(t == "Ann & Ben" || t == "Ben & Ann" || t == "Cat & Dan" || t == "Dan & Cat");
    }
    assert_eq!(rows[0].court, "1");
    assert_eq!(rows[1].court, BYE_LABEL);
    assert_eq!(rows[1].team_1, "Eve");
    assert_eq!(rows[1].team_2, "");
}

#[test]
fn bye_row_lists_all_resting_players() {
    let ps: Vec<Player> = ["Ann", "Ben", "Cat"].iter().map(|n| Player::new(*n)).collect();
    let schedule = generate_schedule_seeded(&ps, ScheduleConfig::new(2, 1), 1);
    let rows = schedule_rows(&schedule.rounds, &ps);
    assert_eq!(rows.len(), 2);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.round, i as u32 + 1);
        assert_eq!(row.court, BYE_LABEL);
        let mut names: Vec<&str> = row.team_1.split(", ").collect();
        names.sort();
        assert_eq!(names, vec!["Ann", "Ben", "Cat"]);
    }
}

#[test]
fn sinks_keep_the_written_schedule() {
    let ps: Vec<Player> = (0..6).map(|i| Player::new(format!("P{i}"))).collect();
    let schedule = generate_schedule_seeded(&ps, ScheduleConfig::new(3, 1), 7);
    let rows = schedule_rows(&schedule.rounds, &ps);
    // 3 rounds x (1 court + 1 bye row)
    assert_eq!(rows.len(), 6);

    let memory = MemoryScheduleSink::new();
    memory.write(&rows).unwrap();
    assert_eq!(memory.rows(), rows);

    let path = temp_path("schedule.csv");
    CsvScheduleSink::new(&path).write(&rows).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Round,Court,Team 1,Team 2"));
    assert_eq!(lines.count(), rows.len());
}
