//! Integration tests for team registration, rosters and CSV import.

use football_tournament::logic::parse_roster_csv;
use football_tournament::{
    import_teams, start_tournament, ErrorKind, NewMember, NewTeam, SequentialIds, Tournament,
    TournamentError, TournamentMode, DEFAULT_LOGO,
};

fn cup(capacity: usize) -> Tournament {
    Tournament::new("Cup", TournamentMode::Knockout, capacity)
}

#[test]
fn team_names_are_unique_case_insensitively() {
    let ids = SequentialIds::new("t");
    let mut t = cup(4);
    t.add_team(NewTeam::named("Lions"), &ids).unwrap();
    assert!(matches!(
        t.add_team(NewTeam::named("  LIONS "), &ids),
        Err(TournamentError::DuplicateTeamName)
    ));
    assert_eq!(t.teams.len(), 1);
}

#[test]
fn names_are_trimmed_and_validated() {
    let ids = SequentialIds::new("t");
    let mut t = cup(4);
    let id = t.add_team(NewTeam::named("  Tigers  "), &ids).unwrap();
    assert_eq!(id, "t1");
    assert_eq!(t.teams[0].name, "Tigers");
    assert_eq!(t.teams[0].logo, DEFAULT_LOGO);

    assert!(matches!(
        t.add_team(NewTeam::named("   "), &ids),
        Err(TournamentError::EmptyName)
    ));
    assert!(matches!(
        t.add_team(NewTeam::named("bye"), &ids),
        Err(TournamentError::ReservedName)
    ));
}

#[test]
fn roster_capacity_is_enforced() {
    let ids = SequentialIds::new("t");
    let mut t = cup(2);
    t.add_team(NewTeam::named("A"), &ids).unwrap();
    t.add_team(NewTeam::named("B"), &ids).unwrap();
    let err = t.add_team(NewTeam::named("C"), &ids).unwrap_err();
    assert_eq!(err, TournamentError::RosterFull { capacity: 2 });
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn registration_closes_once_started() {
    let ids = SequentialIds::new("t");
    let mut t = cup(4);
    let id = t.add_team(NewTeam::named("A"), &ids).unwrap();
    start_tournament(&mut t, &ids).unwrap();

    assert!(matches!(
        t.add_team(NewTeam::named("B"), &ids),
        Err(TournamentError::InvalidState)
    ));
    assert!(matches!(
        t.update_team(&id, Some("Renamed".to_string()), None),
        Err(TournamentError::InvalidState)
    ));
    assert!(matches!(t.remove_team(&id), Err(TournamentError::InvalidState)));

    // Logos and members can still change.
    t.update_team(&id, None, Some("a.png".to_string())).unwrap();
    assert_eq!(t.teams[0].logo, "a.png");
    t.add_member(&id, NewMember { name: "Keeper".to_string(), number: Some(1), position: None }, &ids)
        .unwrap();
    assert_eq!(t.teams[0].members.len(), 1);
}

#[test]
fn placeholder_teams_fill_remaining_capacity() {
    let ids = SequentialIds::new("t");
    let mut t = cup(4);
    t.add_team(NewTeam::named("team 2"), &ids).unwrap();
    t.fill_placeholder_teams(&ids).unwrap();

    let names: Vec<&str> = t.teams.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, vec!["team 2", "Team 1", "Team 3", "Team 4"]);
}

#[test]
fn rename_checks_other_teams_only() {
    let ids = SequentialIds::new("t");
    let mut t = cup(4);
    let a = t.add_team(NewTeam::named("A"), &ids).unwrap();
    t.add_team(NewTeam::named("B"), &ids).unwrap();

    t.update_team(&a, Some("a".to_string()), None).unwrap();
    assert_eq!(t.teams[0].name, "a");
    assert!(matches!(
        t.update_team(&a, Some("b".to_string()), None),
        Err(TournamentError::DuplicateTeamName)
    ));
    assert!(matches!(
        t.update_team("missing", None, None),
        Err(TournamentError::TeamNotFound(_))
    ));
}

#[test]
fn members_need_a_name_and_a_known_team() {
    let ids = SequentialIds::new("t");
    let mut t = cup(4);
    let id = t.add_team(NewTeam::named("A"), &ids).unwrap();

    assert!(matches!(
        t.add_member(&id, NewMember::default(), &ids),
        Err(TournamentError::EmptyName)
    ));
    let err = t
        .add_member("ghost", NewMember { name: "X".to_string(), ..NewMember::default() }, &ids)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn roster_csv_parses_names_and_optional_logos() {
    let csv = "name,logo\nLions, lions.png\nTigers,\n";
    let teams = parse_roster_csv(csv.as_bytes()).unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].name, "Lions");
    assert_eq!(teams[0].logo.as_deref(), Some("lions.png"));
    assert_eq!(teams[1].logo, None);

    let names_only = parse_roster_csv("name\nBears\n".as_bytes()).unwrap();
    assert_eq!(names_only[0].name, "Bears");
}

#[test]
fn roster_import_registers_every_team() {
    let ids = SequentialIds::new("t");
    let mut t = cup(3);
    let added = import_teams(&mut t, "name\nA\nB\nC\n".as_bytes(), &ids).unwrap();
    assert_eq!(added.len(), 3);

    let mut t = cup(3);
    assert!(matches!(
        import_teams(&mut t, "name\nA\na\n".as_bytes(), &ids),
        Err(TournamentError::DuplicateTeamName)
    ));
    assert!(matches!(
        import_teams(&mut t, "name\n".as_bytes(), &ids),
        Err(TournamentError::InvalidRoster(_))
    ));
}
