//! Data structures for a football tournament: teams, fixtures, standings, bracket.

mod fixture;
mod standings;
mod team;
mod tournament;

pub use fixture::{
    BracketCoordinate, EventKind, FixtureGroup, Match, MatchEvent, MatchId, MatchStatus, Side,
    Stage, BYE,
};
pub use standings::{BracketData, BracketResult, GroupStandings, StandingRow};
pub use team::{Member, NewMember, NewTeam, Team, TeamId, TeamStats, DEFAULT_LOGO};
pub use tournament::{
    ErrorKind, Tournament, TournamentError, TournamentId, TournamentMode, TournamentStatus,
};
