//! Bulk team registration from CSV (`name[,logo]` with a header row).

use crate::ids::IdGenerator;
use crate::models::{NewTeam, TeamId, Tournament, TournamentError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    logo: Option<String>,
}

/// Parse a roster CSV into team registrations. Extra columns are ignored.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<NewTeam>, TournamentError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<RosterRow>()
        .map(|row| {
            row.map(|row: RosterRow| NewTeam {
                name: row.name,
                logo: row.logo,
                members: Vec::new(),
            })
            .map_err(|e| TournamentError::InvalidRoster(e.to_string()))
        })
        .collect()
}

/// Register every team of a roster CSV. Stops at the first rejected team.
pub fn import_teams<R: Read>(
    tournament: &mut Tournament,
    reader: R,
    ids: &impl IdGenerator,
) -> Result<Vec<TeamId>, TournamentError> {
    let teams = parse_roster_csv(reader)?;
    if teams.is_empty() {
        return Err(TournamentError::InvalidRoster("no teams".to_string()));
    }
    teams
        .into_iter()
        .map(|team| tournament.add_team(team, ids))
        .collect()
}
