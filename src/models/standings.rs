//! Standings tables and the bracket visualization data.

use serde::{Deserialize, Serialize};

/// One team's line in a group table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl StandingRow {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            ..Self::default()
        }
    }
}

/// Ranked table for one group-stage pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings {
    pub group: String,
    pub rows: Vec<StandingRow>,
}

impl GroupStandings {
    /// Team name at the given 0-based rank.
    pub fn team_at(&self, rank: usize) -> Option<&str> {
        self.rows.get(rank).map(|r| r.team.as_str())
    }
}

/// Scores of one bracket match as shown in the visualization (`[score1, score2]`).
pub type BracketResult = [Option<u32>; 2];

/// Knockout pairings plus a round-indexed results matrix mirroring every match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketData {
    /// First-round pairings (may include the BYE placeholder).
    pub teams: Vec<[String; 2]>,
    /// `results[round][index]` mirrors the scores of the match at that coordinate.
    pub results: Vec<Vec<BracketResult>>,
}
