//! Service layer: load a tournament, run one operation on it, save it.
//!
//! Operations work on the loaded copy, so a rejected operation never reaches the
//! repository and the stored aggregate stays as it was.

use crate::ids::IdGenerator;
use crate::logic::{
    complete_tournament, generate_knockout_stage, import_teams, start_tournament, update_match,
    MatchUpdate,
};
use crate::models::{NewMember, NewTeam, Tournament, TournamentError, TournamentId, TournamentMode};
use crate::repository::{TournamentPatch, TournamentRepository};
use serde::{Deserialize, Serialize};

/// Parameters for creating a tournament.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateTournament {
    pub name: String,
    #[serde(default)]
    pub mode: TournamentMode,
    pub teams_count: usize,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Fill the roster with numbered placeholder teams right away.
    #[serde(default)]
    pub placeholder_teams: bool,
}

pub struct TournamentService<R, G> {
    repository: R,
    ids: G,
}

impl<R: TournamentRepository, G: IdGenerator> TournamentService<R, G> {
    pub fn new(repository: R, ids: G) -> Self {
        Self { repository, ids }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn create_tournament(&self, request: CreateTournament) -> Result<Tournament, TournamentError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let mut tournament = Tournament::new(name, request.mode, request.teams_count);
        tournament.organizer = request.organizer;
        tournament.description = request.description;
        if request.placeholder_teams {
            tournament.fill_placeholder_teams(&self.ids)?;
        }
        log::info!("Created tournament {} ({})", tournament.id, tournament.name);
        Ok(self.repository.save(tournament))
    }

    pub fn get(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.repository
            .find_by_id(id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    pub fn update_details(
        &self,
        id: TournamentId,
        patch: TournamentPatch,
    ) -> Result<Tournament, TournamentError> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(TournamentError::EmptyName);
        }
        self.repository
            .update(id, patch)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    pub fn delete(&self, id: TournamentId) -> Result<(), TournamentError> {
        if self.repository.delete(id) {
            log::info!("Deleted tournament {}", id);
            Ok(())
        } else {
            Err(TournamentError::TournamentNotFound(id))
        }
    }

    pub fn add_team(&self, id: TournamentId, team: NewTeam) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, ids| t.add_team(team, ids).map(drop))
    }

    pub fn import_teams(&self, id: TournamentId, csv: &[u8]) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, ids| import_teams(t, csv, ids).map(drop))
    }

    pub fn update_team(
        &self,
        id: TournamentId,
        team_id: &str,
        name: Option<String>,
        logo: Option<String>,
    ) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, _| t.update_team(team_id, name, logo))
    }

    pub fn remove_team(&self, id: TournamentId, team_id: &str) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, _| t.remove_team(team_id))
    }

    pub fn add_member(
        &self,
        id: TournamentId,
        team_id: &str,
        member: NewMember,
    ) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, ids| t.add_member(team_id, member, ids).map(drop))
    }

    pub fn start(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, ids| start_tournament(t, ids))
    }

    pub fn update_match(
        &self,
        id: TournamentId,
        match_id: &str,
        update: MatchUpdate,
    ) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, _| update_match(t, match_id, update))
    }

    pub fn generate_knockout_stage(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, ids| generate_knockout_stage(t, ids))
    }

    pub fn complete(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.modify(id, |t, _| complete_tournament(t))
    }

    fn modify<F>(&self, id: TournamentId, op: F) -> Result<Tournament, TournamentError>
    where
        F: FnOnce(&mut Tournament, &G) -> Result<(), TournamentError>,
    {
        let mut tournament = self.get(id)?;
        op(&mut tournament, &self.ids)?;
        Ok(self.repository.save(tournament))
    }
}
