//! Tournament aggregate, its lifecycle status and TournamentError.

use crate::ids::IdGenerator;
use crate::models::fixture::{BracketCoordinate, FixtureGroup, Match, MatchId, Stage, BYE};
use crate::models::standings::{BracketData, GroupStandings};
use crate::models::team::{Member, NewMember, NewTeam, Team, TeamId, DEFAULT_LOGO};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad classification of a TournamentError.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Validation,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    TournamentNotFound(TournamentId),
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    /// Tournament is not in a status that allows this action.
    InvalidState,
    /// Starting a tournament with no registered teams.
    NoTeams,
    /// Group-stage matches are frozen once a knockout stage exists.
    GroupStageLocked,
    /// Knockout stage requested before every group match has a result.
    IncompleteGroupResults,
    /// Group standings yielded nobody to put in a bracket.
    NoQualifiedTeams,
    /// Knockout match participants are not decided yet (or one of them is a BYE).
    MatchNotReady(MatchId),
    /// The round this match feeds into already has a result.
    NextRoundPlayed(MatchId),
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    RosterFull { capacity: usize },
    EmptyName,
    /// The name is reserved for the bracket placeholder.
    ReservedName,
    InvalidRoster(String),
    InvalidScore(u32),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            TournamentNotFound(_) | TeamNotFound(_) | MatchNotFound(_) => ErrorKind::NotFound,
            InvalidState
            | NoTeams
            | GroupStageLocked
            | IncompleteGroupResults
            | NoQualifiedTeams
            | MatchNotReady(_)
            | NextRoundPlayed(_) => ErrorKind::InvalidState,
            DuplicateTeamName
            | RosterFull { .. }
            | EmptyName
            | ReservedName
            | InvalidRoster(_)
            | InvalidScore(_) => ErrorKind::Validation,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::TournamentNotFound(id) => write!(f, "Tournament {} not found", id),
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::NoTeams => write!(f, "Register at least one team before starting"),
            TournamentError::GroupStageLocked => {
                write!(f, "Group stage is locked once the knockout stage has been generated")
            }
            TournamentError::IncompleteGroupResults => {
                write!(f, "All group matches need a result before generating the knockout stage")
            }
            TournamentError::NoQualifiedTeams => {
                write!(f, "Not enough teams or groups to generate a knockout stage")
            }
            TournamentError::MatchNotReady(id) => {
                write!(f, "Match {} has no two decided opponents yet", id)
            }
            TournamentError::NextRoundPlayed(id) => {
                write!(f, "Match {} feeds a match that already has a result", id)
            }
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::RosterFull { capacity } => {
                write!(f, "Tournament is full ({} teams)", capacity)
            }
            TournamentError::EmptyName => write!(f, "Name must not be empty"),
            TournamentError::ReservedName => write!(f, "\"{}\" is a reserved name", BYE),
            TournamentError::InvalidRoster(msg) => write!(f, "Invalid roster: {}", msg),
            TournamentError::InvalidScore(score) => write!(f, "Score {} is out of range", score),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competition format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentMode {
    /// Single-elimination bracket from the start.
    #[default]
    Knockout,
    /// Round-robin pools, optionally followed by a knockout stage.
    GroupStage,
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Registering teams; no fixtures yet.
    #[default]
    Upcoming,
    /// Fixtures generated; results being entered.
    Ongoing,
    /// Closed by the organizer. Terminal.
    Completed,
}

/// Full tournament aggregate: teams, fixtures, standings and bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub mode: TournamentMode,
    /// Target capacity of the roster.
    pub teams_count: usize,
    pub teams: Vec<Team>,
    pub fixtures: Vec<FixtureGroup>,
    pub standings: Vec<GroupStandings>,
    pub bracket_data: Option<BracketData>,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Upcoming status with no teams.
    pub fn new(name: impl Into<String>, mode: TournamentMode, teams_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            organizer: None,
            description: None,
            mode,
            teams_count,
            teams: Vec::new(),
            fixtures: Vec::new(),
            standings: Vec::new(),
            bracket_data: None,
            status: TournamentStatus::Upcoming,
            created_at: Utc::now(),
        }
    }

    /// Group-stage matches are frozen once a knockout stage has been derived from them.
    pub fn is_group_stage_locked(&self) -> bool {
        self.bracket_data.is_some()
    }

    pub fn team_names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    pub fn get_team_mut(&mut self, id: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    /// Pools of the group stage, in fixture order.
    pub fn group_fixtures(&self) -> impl Iterator<Item = &FixtureGroup> {
        self.fixtures.iter().filter(|g| g.stage == Stage::Group)
    }

    /// Knockout rounds, in fixture order.
    pub fn knockout_fixtures(&self) -> impl Iterator<Item = &FixtureGroup> {
        self.fixtures.iter().filter(|g| g.stage == Stage::Knockout)
    }

    /// Look up a match by id across all fixture groups.
    pub fn find_match(&self, id: &str) -> Option<(&FixtureGroup, &Match)> {
        self.fixtures
            .iter()
            .find_map(|g| g.matches.iter().find(|m| m.id == id).map(|m| (g, m)))
    }

    pub fn find_match_mut(&mut self, id: &str) -> Option<&mut Match> {
        self.fixtures
            .iter_mut()
            .flat_map(|g| g.matches.iter_mut())
            .find(|m| m.id == id)
    }

    /// Knockout match at a bracket coordinate.
    pub fn match_at(&self, coordinate: BracketCoordinate) -> Option<&Match> {
        self.knockout_fixtures()
            .flat_map(|g| g.matches.iter())
            .find(|m| m.bracket == Some(coordinate))
    }

    /// Winner of the final, once it has been decided.
    pub fn champion(&self) -> Option<&str> {
        let last_round = self
            .knockout_fixtures()
            .flat_map(|g| g.matches.iter())
            .filter_map(|m| m.bracket.map(|c| c.round))
            .max()?;
        self.match_at(BracketCoordinate::new(last_round, 0))?.winner()
    }

    fn check_team_name(&self, name: &str, except: Option<&str>) -> Result<(), TournamentError> {
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if name.eq_ignore_ascii_case(BYE) {
            return Err(TournamentError::ReservedName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .filter(|t| Some(t.id.as_str()) != except)
            .any(|t| t.name.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        Ok(())
    }

    /// Register a team (Upcoming only). Names must be unique (case-insensitive) and the
    /// roster must not be at capacity. Returns the new team's id.
    pub fn add_team(
        &mut self,
        team: NewTeam,
        ids: &impl IdGenerator,
    ) -> Result<TeamId, TournamentError> {
        if self.status != TournamentStatus::Upcoming {
            return Err(TournamentError::InvalidState);
        }
        if self.teams.len() >= self.teams_count {
            return Err(TournamentError::RosterFull {
                capacity: self.teams_count,
            });
        }
        let name = team.name.trim();
        self.check_team_name(name, None)?;
        let members = team
            .members
            .into_iter()
            .map(|m| new_member(m, ids))
            .collect::<Result<Vec<_>, _>>()?;

        let mut new_team = Team::new(ids.next_id(), name);
        if let Some(logo) = team.logo.filter(|l| !l.trim().is_empty()) {
            new_team.logo = logo;
        }
        new_team.members = members;
        let id = new_team.id.clone();
        self.teams.push(new_team);
        Ok(id)
    }

    /// Fill the remaining capacity with numbered placeholder teams ("Team 1", "Team 2", ...).
    pub fn fill_placeholder_teams(&mut self, ids: &impl IdGenerator) -> Result<(), TournamentError> {
        let mut n = 1;
        while self.teams.len() < self.teams_count {
            let name = format!("Team {}", n);
            n += 1;
            if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(&name)) {
                continue;
            }
            self.add_team(NewTeam::named(name), ids)?;
        }
        Ok(())
    }

    /// Rename a team and/or change its logo. Renaming is only allowed before the
    /// schedule exists, since fixtures reference teams by name.
    pub fn update_team(
        &mut self,
        team_id: &str,
        name: Option<String>,
        logo: Option<String>,
    ) -> Result<(), TournamentError> {
        if !self.teams.iter().any(|t| t.id == team_id) {
            return Err(TournamentError::TeamNotFound(team_id.to_string()));
        }
        let name = name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            if self.status != TournamentStatus::Upcoming {
                return Err(TournamentError::InvalidState);
            }
            self.check_team_name(name, Some(team_id))?;
        }
        let team = self
            .get_team_mut(team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))?;
        if let Some(name) = name {
            team.name = name;
        }
        if let Some(logo) = logo {
            team.logo = if logo.trim().is_empty() {
                DEFAULT_LOGO.to_string()
            } else {
                logo
            };
        }
        Ok(())
    }

    /// Remove a team by id (Upcoming only).
    pub fn remove_team(&mut self, team_id: &str) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Upcoming {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Add a player to a team's roster. Returns the new member's id.
    pub fn add_member(
        &mut self,
        team_id: &str,
        member: NewMember,
        ids: &impl IdGenerator,
    ) -> Result<String, TournamentError> {
        let team = self
            .get_team_mut(team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))?;
        let member = new_member(member, ids)?;
        let id = member.id.clone();
        team.members.push(member);
        Ok(id)
    }
}

fn new_member(member: NewMember, ids: &impl IdGenerator) -> Result<Member, TournamentError> {
    let name = member.name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    Ok(Member {
        id: ids.next_id(),
        name: name.to_string(),
        number: member.number,
        position: member.position,
    })
}
