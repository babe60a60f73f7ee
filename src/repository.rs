//! Persistence of tournament aggregates by id.

use crate::models::{Tournament, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Editable tournament details (everything else changes through the engine).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Load/save of whole tournament aggregates. Implementations serialize concurrent
/// writes to the same id; last writer wins.
pub trait TournamentRepository {
    fn find_by_id(&self, id: TournamentId) -> Option<Tournament>;
    fn save(&self, tournament: Tournament) -> Tournament;
    fn update(&self, id: TournamentId, patch: TournamentPatch) -> Option<Tournament>;
    /// Returns whether a tournament was removed.
    fn delete(&self, id: TournamentId) -> bool;
}

/// In-memory store keyed by tournament id.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tournaments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TournamentRepository for InMemoryRepository {
    fn find_by_id(&self, id: TournamentId) -> Option<Tournament> {
        self.tournaments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn save(&self, tournament: Tournament) -> Tournament {
        let mut g = self
            .tournaments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        g.insert(tournament.id, tournament.clone());
        tournament
    }

    fn update(&self, id: TournamentId, patch: TournamentPatch) -> Option<Tournament> {
        let mut g = self
            .tournaments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let t = g.get_mut(&id)?;
        if let Some(name) = patch.name {
            t.name = name;
        }
        if let Some(organizer) = patch.organizer {
            t.organizer = Some(organizer);
        }
        if let Some(description) = patch.description {
            t.description = Some(description);
        }
        Some(t.clone())
    }

    fn delete(&self, id: TournamentId) -> bool {
        self.tournaments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }
}
