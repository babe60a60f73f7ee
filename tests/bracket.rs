//! Integration tests for bracket generation, BYE handling and winner propagation.

use football_tournament::logic::bracket::{
    advance_winner, generate_knockout, matches_in_round, round_name, total_rounds, withdraw_team,
};
use football_tournament::{BracketCoordinate, FixtureGroup, Match, SequentialIds, Stage, BYE};

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("T{i}")).collect()
}

fn at(fixtures: &[FixtureGroup], round: usize, index: usize) -> &Match {
    fixtures
        .iter()
        .flat_map(|g| g.matches.iter())
        .find(|m| m.bracket == Some(BracketCoordinate::new(round, index)))
        .unwrap()
}

#[test]
fn eight_teams_make_quarterfinals_semifinals_and_final() {
    let ids = SequentialIds::new("ko");
    let ko = generate_knockout(&names(8), &ids);

    let rounds: Vec<(&str, usize)> = ko
        .fixtures
        .iter()
        .map(|g| (g.group.as_str(), g.matches.len()))
        .collect();
    assert_eq!(
        rounds,
        vec![("Quarterfinal", 4), ("Semifinal", 2), ("Final", 1)]
    );
    assert!(ko.fixtures.iter().all(|g| g.stage == Stage::Knockout));

    let first = &ko.fixtures[0].matches;
    assert_eq!(first[0].team1.as_deref(), Some("T1"));
    assert_eq!(first[0].team2.as_deref(), Some("T2"));
    assert_eq!(first[3].team2.as_deref(), Some("T8"));
    for group in &ko.fixtures[1..] {
        for m in &group.matches {
            assert!(m.team1.is_none() && m.team2.is_none());
        }
    }

    for (round, group) in ko.fixtures.iter().enumerate() {
        for (index, m) in group.matches.iter().enumerate() {
            assert_eq!(m.bracket, Some(BracketCoordinate::new(round, index)));
        }
    }
    assert_eq!(ko.fixtures[1].matches[1].date, "Semifinal - Match 2");
}

#[test]
fn results_matrix_mirrors_every_match() {
    let ids = SequentialIds::new("ko");
    let ko = generate_knockout(&names(8), &ids);
    let shape: Vec<usize> = ko.bracket_data.results.iter().map(Vec::len).collect();
    assert_eq!(shape, vec![4, 2, 1]);
    assert!(ko
        .bracket_data
        .results
        .iter()
        .flatten()
        .all(|r| *r == [None, None]));
    assert_eq!(ko.bracket_data.teams.len(), 4);
    assert_eq!(ko.bracket_data.teams[1], ["T3".to_string(), "T4".to_string()]);
}

#[test]
fn total_rounds_is_ceil_log2() {
    assert_eq!(total_rounds(2), 1);
    assert_eq!(total_rounds(3), 2);
    assert_eq!(total_rounds(4), 2);
    assert_eq!(total_rounds(5), 3);
    assert_eq!(total_rounds(8), 3);
    assert_eq!(total_rounds(9), 4);
    assert_eq!(total_rounds(16), 4);
    assert_eq!(matches_in_round(6, 1), 2);
}

#[test]
fn real_matches_number_one_less_than_teams() {
    let ids = SequentialIds::new("ko");
    for n in 1..=17 {
        let ko = generate_knockout(&names(n), &ids);
        let slots = n + n % 2;
        assert_eq!(ko.fixtures.len(), total_rounds(slots), "rounds for {n}");
        let real = ko
            .fixtures
            .iter()
            .flat_map(|g| g.matches.iter())
            .filter(|m| !m.is_bye())
            .count();
        assert_eq!(real, n - 1, "real matches for {n} teams");
    }
}

#[test]
fn round_names_follow_match_count() {
    assert_eq!(round_name(1), "Final");
    assert_eq!(round_name(2), "Semifinal");
    assert_eq!(round_name(4), "Quarterfinal");
    assert_eq!(round_name(8), "Round of 16");
    assert_eq!(round_name(3), "Round of 6");
}

#[test]
fn bye_team_advances_automatically() {
    let ids = SequentialIds::new("ko");
    let ko = generate_knockout(&names(3), &ids);
    assert_eq!(ko.fixtures[0].matches[1].team2.as_deref(), Some(BYE));
    let last = at(&ko.fixtures, 1, 0);
    assert_eq!(last.team1, None);
    assert_eq!(last.team2.as_deref(), Some("T3"));

    // T5 gets a BYE in round 0 and again in round 1 (no second feeder).
    let ko = generate_knockout(&names(5), &ids);
    let second_round_bye = at(&ko.fixtures, 1, 1);
    assert_eq!(second_round_bye.team1.as_deref(), Some("T5"));
    assert_eq!(second_round_bye.team2.as_deref(), Some(BYE));
    let last = at(&ko.fixtures, 2, 0);
    assert_eq!(last.team1, None);
    assert_eq!(last.team2.as_deref(), Some("T5"));
}

#[test]
fn winner_fills_team1_for_even_index_and_team2_for_odd() {
    let ids = SequentialIds::new("ko");
    let mut fixtures = generate_knockout(&names(8), &ids).fixtures;

    advance_winner(&mut fixtures, BracketCoordinate::new(0, 2), "T5");
    advance_winner(&mut fixtures, BracketCoordinate::new(0, 3), "T8");
    let semi = at(&fixtures, 1, 1);
    assert_eq!(semi.team1.as_deref(), Some("T5"));
    assert_eq!(semi.team2.as_deref(), Some("T8"));

    // Advancing out of the final is a no-op.
    advance_winner(&mut fixtures, BracketCoordinate::new(2, 0), "T5");
    assert_eq!(fixtures.len(), 3);
}

#[test]
fn withdrawn_team_is_cleared_through_bye_matches() {
    let ids = SequentialIds::new("ko");
    let mut fixtures = generate_knockout(&names(8), &ids).fixtures;
    advance_winner(&mut fixtures, BracketCoordinate::new(0, 1), "T3");
    withdraw_team(&mut fixtures, BracketCoordinate::new(0, 1));
    assert_eq!(at(&fixtures, 1, 0).team2, None);

    // T5 reached the final through two BYE matches; both slots are emptied.
    let mut fixtures = generate_knockout(&names(5), &ids).fixtures;
    withdraw_team(&mut fixtures, BracketCoordinate::new(0, 2));
    assert_eq!(at(&fixtures, 1, 1).team1, None);
    assert_eq!(at(&fixtures, 1, 1).team2.as_deref(), Some(BYE));
    assert_eq!(at(&fixtures, 2, 0).team2, None);
}
