//! Match, FixtureGroup and the knockout bracket coordinate.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = String;

/// Placeholder opponent that grants automatic advancement.
pub const BYE: &str = "BYE";

/// Lifecycle of a match. Always derived from the match data, never set by callers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

/// Which side of a match (team1 or team2).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
}

/// Something that happened during a match (goal, card, substitution).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u32,
    pub side: Side,
    pub kind: EventKind,
    pub player: String,
}

/// Position of a knockout match in the bracket tree.
/// Round 0 is the first elimination round; the final has the highest round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct BracketCoordinate {
    pub round: usize,
    pub index: usize,
}

impl BracketCoordinate {
    pub fn new(round: usize, index: usize) -> Self {
        Self { round, index }
    }

    /// Coordinate of the match the winner advances to.
    pub fn next(&self) -> Self {
        Self {
            round: self.round + 1,
            index: self.index / 2,
        }
    }

    /// Which slot of the next match the winner fills.
    pub fn next_side(&self) -> Side {
        if self.index % 2 == 0 {
            Side::One
        } else {
            Side::Two
        }
    }
}

pub fn default_kickoff() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default()
}

/// A single fixture between two teams, referenced by name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// None until decided (later knockout rounds).
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub status: MatchStatus,
    #[serde(default = "default_kickoff")]
    pub kickoff: NaiveTime,
    /// Schedule label, e.g. "Round 2" or "Semifinal - Match 1".
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub lineup1: Vec<String>,
    #[serde(default)]
    pub lineup2: Vec<String>,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    /// Only set for knockout matches.
    #[serde(default)]
    pub bracket: Option<BracketCoordinate>,
}

impl Match {
    pub fn new(
        id: impl Into<MatchId>,
        team1: Option<String>,
        team2: Option<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            team1,
            team2,
            score1: None,
            score2: None,
            status: MatchStatus::Scheduled,
            kickoff: default_kickoff(),
            date: date.into(),
            lineup1: Vec::new(),
            lineup2: Vec::new(),
            events: Vec::new(),
            bracket: None,
        }
    }

    pub fn with_bracket(mut self, coordinate: BracketCoordinate) -> Self {
        self.bracket = Some(coordinate);
        self
    }

    /// Both scores, if the match is finished.
    pub fn scores(&self) -> Option<(u32, u32)> {
        self.score1.zip(self.score2)
    }

    pub fn derive_status(&self) -> MatchStatus {
        if self.scores().is_some() {
            MatchStatus::Finished
        } else if !self.events.is_empty() {
            MatchStatus::Live
        } else {
            MatchStatus::Scheduled
        }
    }

    pub fn team(&self, side: Side) -> Option<&str> {
        match side {
            Side::One => self.team1.as_deref(),
            Side::Two => self.team2.as_deref(),
        }
    }

    pub fn set_team(&mut self, side: Side, name: String) {
        match side {
            Side::One => self.team1 = Some(name),
            Side::Two => self.team2 = Some(name),
        }
    }

    pub fn clear_team(&mut self, side: Side) {
        match side {
            Side::One => self.team1 = None,
            Side::Two => self.team2 = None,
        }
    }

    /// True when one side is the BYE placeholder.
    pub fn is_bye(&self) -> bool {
        self.team1.as_deref() == Some(BYE) || self.team2.as_deref() == Some(BYE)
    }

    /// Name of the team that wins this match, if decided.
    /// A draw has no winner; a BYE match is won by the lone real team.
    pub fn winner(&self) -> Option<&str> {
        if self.is_bye() {
            return [self.team1.as_deref(), self.team2.as_deref()]
                .into_iter()
                .flatten()
                .find(|name| *name != BYE);
        }
        let (s1, s2) = self.scores()?;
        if s1 > s2 {
            self.team1.as_deref()
        } else if s2 > s1 {
            self.team2.as_deref()
        } else {
            None
        }
    }
}

/// Phase a fixture group belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// A round-robin pool.
    Group,
    /// A knockout round.
    Knockout,
}

/// A named collection of matches: a group-stage pool or a knockout round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureGroup {
    pub group: String,
    pub stage: Stage,
    pub matches: Vec<Match>,
}

impl FixtureGroup {
    pub fn new(group: impl Into<String>, stage: Stage, matches: Vec<Match>) -> Self {
        Self {
            group: group.into(),
            stage,
            matches,
        }
    }

    pub fn is_group_stage(&self) -> bool {
        self.stage == Stage::Group
    }
}
