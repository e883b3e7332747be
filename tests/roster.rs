//! Roster editing, name cleaning and conversion to/from store rows.

use badminton_scheduler::{clean_name, PlayerStatus, Roster, RosterError, RosterRow};

#[test]
fn clean_name_trims_and_drops_control_characters() {
    assert_eq!(clean_name("  Alice \t"), "Alice");
    assert_eq!(clean_name("Bo\u{0}b\n"), "Bob");
    assert_eq!(clean_name("Ann\u{7}e Marie"), "Anne Marie");
    assert_eq!(clean_name(" \r\n "), "");
}

#[test]
fn add_player_rejects_empty_and_duplicate_names() {
    let mut roster = Roster::new();
    let id = roster.add_player("  Alice ", false, None).unwrap();
    assert_eq!(roster.get_player(id).unwrap().name, "Alice");

    assert_eq!(roster.add_player("\t", false, None), Err(RosterError::EmptyName));
    assert_eq!(
        roster.add_player("ALICE", false, None),
        Err(RosterError::DuplicatePlayerName("ALICE".to_string()))
    );
    assert_eq!(roster.len(), 1);
}

#[test]
fn departure_round_must_be_positive() {
    let mut roster = Roster::new();
    assert_eq!(
        roster.add_player("Dan", true, Some(0)),
        Err(RosterError::InvalidDepartureRound)
    );
    let id = roster.add_player("Dan", false, Some(2)).unwrap();
    let p = roster.get_player(id).unwrap();
    assert!(p.early_leave);
    assert!(p.is_active_in_round(2));
    assert!(!p.is_active_in_round(3));

    assert_eq!(roster.set_departure(id, Some(0)), Err(RosterError::InvalidDepartureRound));
    roster.set_departure(id, None).unwrap();
    let p = roster.get_player(id).unwrap();
    assert!(!p.early_leave);
    assert!(p.is_active_in_round(20));
}

#[test]
fn remove_and_status_need_a_known_player() {
    let mut roster = Roster::new();
    let a = roster.add_player("A", false, None).unwrap();
    let b = roster.add_player("B", false, None).unwrap();

    roster.set_status(b, PlayerStatus::Absent).unwrap();
    let attending: Vec<_> = roster.attending().into_iter().map(|p| p.id).collect();
    assert_eq!(attending, vec![a]);

    let removed = roster.remove_player(a).unwrap();
    assert_eq!(removed.name, "A");
    assert_eq!(roster.remove_player(a), Err(RosterError::PlayerNotFound(a)));
    assert_eq!(
        roster.set_status(a, PlayerStatus::Attending),
        Err(RosterError::PlayerNotFound(a))
    );
}

#[test]
fn from_rows_skips_blank_and_duplicate_names() {
    let rows = vec![
        RosterRow::new(" Alice"),
        RosterRow::new("   "),
        RosterRow::new("alice"),
        RosterRow {
            name: "Bob".to_string(),
            early_leave: true,
            leave_after_round: Some(3),
            status: Some(PlayerStatus::Absent),
        },
    ];
    let roster = Roster::from_rows(rows);
    let names: Vec<&str> = roster.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(roster.players[0].status, PlayerStatus::Attending);
    assert_eq!(roster.players[1].status, PlayerStatus::Absent);
    assert_eq!(roster.players[1].leave_after_round, Some(3));

    let back = roster.to_rows();
    assert_eq!(back[0], RosterRow {
        name: "Alice".to_string(),
        early_leave: false,
        leave_after_round: None,
        status: Some(PlayerStatus::Attending),
    });
    assert_eq!(back[1].leave_after_round, Some(3));
}

#[test]
fn clean_name_drops_invisible_and_non_space_separators() {
    assert_eq!(clean_name("Al\u{200B}ice\u{00A0}"), "Alice");
    assert_eq!(clean_name("\u{FEFF}Bob\u{2028}"), "Bob");
    assert_eq!(clean_name("Ca\u{00AD}rol\u{E000}"), "Carol");
    assert_eq!(clean_name("\u{202E}Dan\u{2060}"), "Dan");
    // accented letters, CJK and inner ASCII spaces are printable
    assert_eq!(clean_name("José 李"), "José 李");
}

#[test]
fn invisible_characters_do_not_bypass_duplicate_check() {
    let mut roster = Roster::new();
    roster.add_player("Alice", false, None).unwrap();
    assert_eq!(
        roster.add_player("Al\u{200B}ice", false, None),
        Err(RosterError::DuplicatePlayerName("Alice".to_string()))
    );
    assert_eq!(roster.add_player("\u{200B}\u{00A0}", false, None), Err(RosterError::EmptyName));
    assert_eq!(roster.len(), 1);
}
