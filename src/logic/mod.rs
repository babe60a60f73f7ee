//! Tournament business logic: scheduling, brackets, standings, results and lifecycle.

pub mod bracket;
mod lifecycle;
mod progression;
mod roster;
pub mod schedule;
pub mod standings;

pub use bracket::{generate_knockout, KnockoutStructure};
pub use lifecycle::{
    complete_tournament, generate_knockout_stage, select_qualifiers, start_tournament,
};
pub use progression::{update_match, MatchUpdate};
pub use roster::{import_teams, parse_roster_csv};
pub use schedule::{generate_group_fixtures, partition_into_groups, round_robin};
pub use standings::{compute_group_standings, compute_standings, refresh_standings};
