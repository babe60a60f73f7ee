//! Match results: partial updates, edit-lock, status derivation and winner propagation.

use crate::logic::{bracket, standings};
use crate::models::{
    BracketCoordinate, BracketResult, MatchEvent, Tournament, TournamentError, TournamentStatus,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Highest score accepted for one side of a match.
pub const MAX_SCORE: u32 = 999;

/// Fields to change on a match. Absent fields are left as they are.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    #[serde(default)]
    pub score1: Option<u32>,
    #[serde(default)]
    pub score2: Option<u32>,
    #[serde(default)]
    pub kickoff: Option<NaiveTime>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub lineup1: Option<Vec<String>>,
    #[serde(default)]
    pub lineup2: Option<Vec<String>>,
    #[serde(default)]
    pub events: Option<Vec<MatchEvent>>,
}

impl MatchUpdate {
    /// Update carrying only a final score.
    pub fn score(score1: u32, score2: u32) -> Self {
        Self {
            score1: Some(score1),
            score2: Some(score2),
            ..Self::default()
        }
    }

    fn touches_score(&self) -> bool {
        self.score1.is_some() || self.score2.is_some()
    }
}

/// Apply a partial update to one match and everything derived from it.
///
/// 1. Group-stage matches are rejected once the knockout stage exists.
/// 2. A knockout result is frozen once the match it feeds has a score.
/// 3. Present fields are copied; status is re-derived.
/// 4. A decided knockout match pushes its winner into the next round; an
///    undecided one takes back whatever it pushed before.
/// 5. The bracket results mirror is synchronised.
/// 6. Standings and team stats are recomputed.
pub fn update_match(
    tournament: &mut Tournament,
    match_id: &str,
    update: MatchUpdate,
) -> Result<(), TournamentError> {
    if tournament.status == TournamentStatus::Completed {
        return Err(TournamentError::InvalidState);
    }
    if let Some(score) = [update.score1, update.score2]
        .into_iter()
        .flatten()
        .find(|s| *s > MAX_SCORE)
    {
        return Err(TournamentError::InvalidScore(score));
    }
    let (in_group_stage, coordinate, ready) = {
        let (group, m) = tournament
            .find_match(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
        let ready = m.team1.is_some() && m.team2.is_some() && !m.is_bye();
        (group.is_group_stage(), m.bracket, ready)
    };

    if in_group_stage && tournament.is_group_stage_locked() {
        log::warn!("Rejected edit of locked group match {}", match_id);
        return Err(TournamentError::GroupStageLocked);
    }
    if let Some(coordinate) = coordinate.filter(|_| update.touches_score()) {
        if !ready {
            return Err(TournamentError::MatchNotReady(match_id.to_string()));
        }
        if next_round_played(tournament, coordinate) {
            return Err(TournamentError::NextRoundPlayed(match_id.to_string()));
        }
    }

    let m = tournament
        .find_match_mut(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if let Some(score) = update.score1 {
        m.score1 = Some(score);
    }
    if let Some(score) = update.score2 {
        m.score2 = Some(score);
    }
    if let Some(kickoff) = update.kickoff {
        m.kickoff = kickoff;
    }
    if let Some(date) = update.date {
        m.date = date;
    }
    if let Some(lineup) = update.lineup1 {
        m.lineup1 = lineup;
    }
    if let Some(lineup) = update.lineup2 {
        m.lineup2 = lineup;
    }
    if let Some(events) = update.events {
        m.events = events;
    }
    m.status = m.derive_status();
    log::debug!("Match {} is now {:?}", match_id, m.status);

    let scores: BracketResult = [m.score1, m.score2];
    let winner = m.winner().map(str::to_string);

    if let Some(coordinate) = coordinate {
        match winner {
            Some(winner) => bracket::advance_winner(&mut tournament.fixtures, coordinate, &winner),
            None => bracket::withdraw_team(&mut tournament.fixtures, coordinate),
        }
        sync_bracket_result(tournament, coordinate, scores);
    }

    standings::refresh_standings(tournament);
    Ok(())
}

/// Whether the first real match downstream of `from` (skipping BYE walkovers) has a score.
fn next_round_played(tournament: &Tournament, from: BracketCoordinate) -> bool {
    let mut next = from.next();
    while let Some(m) = tournament.match_at(next) {
        if !m.is_bye() {
            return m.score1.is_some() || m.score2.is_some();
        }
        next = next.next();
    }
    false
}

/// Mirror a knockout match's scores into `bracket_data.results`.
fn sync_bracket_result(
    tournament: &mut Tournament,
    coordinate: BracketCoordinate,
    scores: BracketResult,
) {
    let slot = tournament
        .bracket_data
        .as_mut()
        .and_then(|data| data.results.get_mut(coordinate.round))
        .and_then(|round| round.get_mut(coordinate.index));
    if let Some(slot) = slot {
        *slot = scores;
    }
}
