//! Team, Member and TeamStats data structures.

use crate::models::standings::StandingRow;
use serde::{Deserialize, Serialize};

/// Unique identifier for a team (assigned by the id generator).
pub type TeamId = String;

/// Cached record of a team (derived from group standings, never authoritative).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl TeamStats {
    pub fn from_row(row: &StandingRow) -> Self {
        Self {
            played: row.played,
            won: row.won,
            drawn: row.drawn,
            lost: row.lost,
            goal_difference: row.goal_difference,
            points: row.points,
        }
    }
}

/// A player on a team's roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Shirt number, if known.
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}

/// A team registered in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Unique within the tournament (case-insensitive).
    pub name: String,
    pub logo: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub stats: TeamStats,
}

pub const DEFAULT_LOGO: &str = "default.png";

impl Team {
    /// Create a team with the default logo, no members and zeroed stats.
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: DEFAULT_LOGO.to_string(),
            members: Vec::new(),
            stats: TeamStats::default(),
        }
    }
}

/// Registration data for a new team (name plus optional logo and roster).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub members: Vec<NewMember>,
}

impl NewTeam {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}
