//! Integration tests for the service layer over the in-memory repository.

use football_tournament::{
    CreateTournament, InMemoryRepository, MatchUpdate, NewTeam, SequentialIds, Tournament,
    TournamentError, TournamentMode, TournamentPatch, TournamentRepository, TournamentService,
    TournamentStatus,
};
use uuid::Uuid;

type Service = TournamentService<InMemoryRepository, SequentialIds>;

fn service() -> Service {
    TournamentService::new(InMemoryRepository::new(), SequentialIds::new("id"))
}

fn request(mode: TournamentMode, teams_count: usize) -> CreateTournament {
    CreateTournament {
        name: "Summer Cup".to_string(),
        mode,
        teams_count,
        placeholder_teams: true,
        ..CreateTournament::default()
    }
}

fn finish_groups(service: &Service, t: &Tournament) -> Tournament {
    let ids: Vec<String> = t
        .group_fixtures()
        .flat_map(|g| g.matches.iter().map(|m| m.id.clone()))
        .collect();
    let mut latest = t.clone();
    for id in ids {
        latest = service.update_match(t.id, &id, MatchUpdate::score(2, 1)).unwrap();
    }
    latest
}

#[test]
fn create_start_and_score_round_trip_through_the_repository() {
    let service = service();
    let created = service.create_tournament(request(TournamentMode::Knockout, 4)).unwrap();
    assert_eq!(created.status, TournamentStatus::Upcoming);
    assert_eq!(created.teams.len(), 4);
    assert_eq!(created.teams[0].name, "Team 1");

    let started = service.start(created.id).unwrap();
    assert_eq!(started.status, TournamentStatus::Ongoing);

    let first = started.fixtures[0].matches[0].id.clone();
    let updated = service
        .update_match(created.id, &first, MatchUpdate::score(3, 0))
        .unwrap();
    let stored = service.get(created.id).unwrap();
    assert_eq!(stored.fixtures, updated.fixtures);
    assert_eq!(stored.fixtures[1].matches[0].team1.as_deref(), Some("Team 1"));
}

#[test]
fn rejected_update_leaves_stored_aggregate_untouched() {
    let service = service();
    let created = service.create_tournament(request(TournamentMode::GroupStage, 8)).unwrap();
    let started = service.start(created.id).unwrap();
    let finished = finish_groups(&service, &started);
    let with_knockout = service.generate_knockout_stage(created.id).unwrap();
    assert!(with_knockout.bracket_data.is_some());
    assert_eq!(finished.standings.len(), 2);

    let group_match = with_knockout.fixtures[0].matches[0].id.clone();
    assert!(matches!(
        service.update_match(created.id, &group_match, MatchUpdate::score(0, 5)),
        Err(TournamentError::GroupStageLocked)
    ));
    let stored = service.get(created.id).unwrap();
    assert_eq!(stored.fixtures, with_knockout.fixtures);
    assert_eq!(stored.standings, with_knockout.standings);
}

#[test]
fn unknown_tournament_is_not_found() {
    let service = service();
    let id = Uuid::new_v4();
    assert!(matches!(
        service.start(id),
        Err(TournamentError::TournamentNotFound(_))
    ));
    assert!(matches!(
        service.delete(id),
        Err(TournamentError::TournamentNotFound(_))
    ));
}

#[test]
fn details_patch_and_delete() {
    let service = service();
    let created = service
        .create_tournament(CreateTournament {
            name: "Spring".to_string(),
            teams_count: 2,
            ..CreateTournament::default()
        })
        .unwrap();
    assert!(created.teams.is_empty());

    let patch = TournamentPatch {
        organizer: Some("City FA".to_string()),
        ..TournamentPatch::default()
    };
    let patched = service.update_details(created.id, patch).unwrap();
    assert_eq!(patched.name, "Spring");
    assert_eq!(patched.organizer.as_deref(), Some("City FA"));

    let blank = TournamentPatch {
        name: Some(" ".to_string()),
        ..TournamentPatch::default()
    };
    assert!(matches!(
        service.update_details(created.id, blank),
        Err(TournamentError::EmptyName)
    ));

    service.delete(created.id).unwrap();
    assert!(service.repository().is_empty());
}

#[test]
fn team_registration_goes_through_the_service() {
    let service = service();
    let created = service
        .create_tournament(CreateTournament {
            name: "Open".to_string(),
            teams_count: 3,
            ..CreateTournament::default()
        })
        .unwrap();
    service.add_team(created.id, NewTeam::named("Lions")).unwrap();
    let t = service.import_teams(created.id, b"name,logo\nTigers,t.png\n").unwrap();
    assert_eq!(t.teams.len(), 2);

    assert!(matches!(
        service.import_teams(created.id, b"name\nBears\nWolves\n"),
        Err(TournamentError::RosterFull { capacity: 3 })
    ));
    assert_eq!(service.get(created.id).unwrap().teams.len(), 2);
}

#[test]
fn blank_tournament_name_is_rejected() {
    let service = service();
    let mut req = request(TournamentMode::Knockout, 2);
    req.name = "  ".to_string();
    assert!(matches!(
        service.create_tournament(req),
        Err(TournamentError::EmptyName)
    ));
    assert!(service.repository().find_by_id(Uuid::new_v4()).is_none());
}

#[test]
fn aggregate_survives_json() {
    let service = service();
    let created = service.create_tournament(request(TournamentMode::Knockout, 5)).unwrap();
    let started = service.start(created.id).unwrap();

    let json = serde_json::to_string(&started).unwrap();
    let back: Tournament = serde_json::from_str(&json).unwrap();
    assert_eq!(back.fixtures, started.fixtures);
    assert_eq!(back.bracket_data, started.bracket_data);
    assert_eq!(back.status, TournamentStatus::Ongoing);
}
