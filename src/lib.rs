//! Football tournament organizer: library with models, scheduling engine and persistence.

pub mod ids;
pub mod logic;
pub mod models;
pub mod repository;
pub mod service;

pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use logic::{
    complete_tournament, generate_knockout, generate_knockout_stage, import_teams, start_tournament,
    update_match, MatchUpdate,
};
pub use models::{
    BracketCoordinate, BracketData, ErrorKind, EventKind, FixtureGroup, GroupStandings, Match,
    MatchEvent, MatchId, MatchStatus, Member, NewMember, NewTeam, Side, Stage, StandingRow, Team,
    TeamId, TeamStats, Tournament, TournamentError, TournamentId, TournamentMode,
    TournamentStatus, BYE, DEFAULT_LOGO,
};
pub use repository::{InMemoryRepository, TournamentPatch, TournamentRepository};
pub use service::{CreateTournament, TournamentService};
