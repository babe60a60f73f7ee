//! Tournament lifecycle: upcoming → ongoing → completed, plus the knockout stage
//! derived from group results.

use crate::ids::IdGenerator;
use crate::logic::bracket::generate_knockout;
use crate::logic::schedule::generate_group_fixtures;
use crate::logic::standings::{compute_standings, refresh_standings};
use crate::models::{
    GroupStandings, Stage, Tournament, TournamentError, TournamentMode, TournamentStatus,
};

/// Start the tournament: build the full schedule for the registered teams, compute the
/// initial standings and move to Ongoing.
pub fn start_tournament(
    tournament: &mut Tournament,
    ids: &impl IdGenerator,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Upcoming {
        return Err(TournamentError::InvalidState);
    }
    if tournament.teams.is_empty() {
        return Err(TournamentError::NoTeams);
    }

    let names = tournament.team_names();
    match tournament.mode {
        TournamentMode::Knockout => {
            let knockout = generate_knockout(&names, ids);
            tournament.fixtures = knockout.fixtures;
            tournament.bracket_data = Some(knockout.bracket_data);
        }
        TournamentMode::GroupStage => {
            tournament.fixtures = generate_group_fixtures(&names, ids);
            tournament.bracket_data = None;
        }
    }
    refresh_standings(tournament);
    tournament.status = TournamentStatus::Ongoing;
    log::info!(
        "Tournament {} started with {} teams ({:?})",
        tournament.id,
        names.len(),
        tournament.mode
    );
    Ok(())
}

/// Pick bracket entrants from the group tables, already in bracket order.
///
/// - 1 group: 1st v 4th, 2nd v 3rd (or 1st v 2nd with fewer than 4 teams).
/// - 2 groups: A1 v B2, B1 v A2.
/// - 4 groups: A1 v B2, B1 v A2, C1 v D2, D1 v C2.
/// - otherwise: top two of every group, in group order.
pub fn select_qualifiers(standings: &[GroupStandings]) -> Vec<String> {
    let top = |g: &GroupStandings, n: usize| -> Option<Vec<String>> {
        (0..n).map(|i| g.team_at(i).map(str::to_string)).collect()
    };
    let cross = |a: &GroupStandings, b: &GroupStandings| -> Option<Vec<String>> {
        let a = top(a, 2)?;
        let b = top(b, 2)?;
        Some(vec![a[0].clone(), b[1].clone(), b[0].clone(), a[1].clone()])
    };

    match standings {
        [only] => top(only, 4)
            .map(|t| vec![t[0].clone(), t[3].clone(), t[1].clone(), t[2].clone()])
            .or_else(|| top(only, 2))
            .unwrap_or_default(),
        [a, b] => cross(a, b).unwrap_or_default(),
        [a, b, c, d] => [cross(a, b), cross(c, d)]
            .into_iter()
            .flatten()
            .flatten()
            .collect(),
        groups => groups.iter().filter_map(|g| top(g, 2)).flatten().collect(),
    }
}

/// Derive the knockout stage from the group tables (GroupStage tournaments only).
///
/// Every group match must be finished. Any knockout rounds generated earlier are
/// replaced and the bracket data overwritten. Afterwards the group stage is locked.
pub fn generate_knockout_stage(
    tournament: &mut Tournament,
    ids: &impl IdGenerator,
) -> Result<(), TournamentError> {
    if tournament.mode != TournamentMode::GroupStage
        || tournament.status != TournamentStatus::Ongoing
    {
        return Err(TournamentError::InvalidState);
    }
    let incomplete = tournament
        .group_fixtures()
        .flat_map(|g| g.matches.iter())
        .any(|m| m.scores().is_none());
    if incomplete {
        return Err(TournamentError::IncompleteGroupResults);
    }

    let standings = compute_standings(&tournament.fixtures);
    let qualified = select_qualifiers(&standings);
    if qualified.is_empty() {
        return Err(TournamentError::NoQualifiedTeams);
    }

    let knockout = generate_knockout(&qualified, ids);
    tournament.fixtures.retain(|g| g.stage != Stage::Knockout);
    tournament.fixtures.extend(knockout.fixtures);
    tournament.bracket_data = Some(knockout.bracket_data);
    refresh_standings(tournament);
    log::info!(
        "Knockout stage generated for tournament {} with {} qualifiers",
        tournament.id,
        qualified.len()
    );
    Ok(())
}

/// Close the tournament (Ongoing → Completed). Never triggered automatically.
pub fn complete_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Ongoing {
        return Err(TournamentError::InvalidState);
    }
    tournament.status = TournamentStatus::Completed;
    log::info!("Tournament {} completed", tournament.id);
    Ok(())
}
