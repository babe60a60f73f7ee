//! Group tables: points, goal difference and record per team.

use crate::models::{FixtureGroup, GroupStandings, StandingRow, TeamStats, Tournament};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

fn row_index(rows: &mut Vec<StandingRow>, team: &str) -> usize {
    match rows.iter().position(|r| r.team == team) {
        Some(idx) => idx,
        None => {
            rows.push(StandingRow::new(team));
            rows.len() - 1
        }
    }
}

fn record(row: &mut StandingRow, scored: u32, conceded: u32) {
    row.played += 1;
    let diff = i64::from(scored) - i64::from(conceded);
    row.goal_difference = i32::try_from(i64::from(row.goal_difference) + diff)
        .unwrap_or(if diff < 0 { i32::MIN } else { i32::MAX });
    if scored > conceded {
        row.won += 1;
        row.points += POINTS_FOR_WIN;
    } else if scored < conceded {
        row.lost += 1;
    } else {
        row.drawn += 1;
        row.points += POINTS_FOR_DRAW;
    }
}

/// Ranked table for one pool.
///
/// Every team appearing in the pool starts at zero; only finished matches count.
/// Sorted by points, then goal difference. Remaining ties keep the order in which the
/// teams first appear in the fixture list.
pub fn compute_group_standings(group: &FixtureGroup) -> GroupStandings {
    let mut rows: Vec<StandingRow> = Vec::new();
    for m in &group.matches {
        let (Some(team1), Some(team2)) = (m.team1.as_deref(), m.team2.as_deref()) else {
            continue;
        };
        let i1 = row_index(&mut rows, team1);
        let i2 = row_index(&mut rows, team2);
        if let Some((s1, s2)) = m.scores() {
            record(&mut rows[i1], s1, s2);
            record(&mut rows[i2], s2, s1);
        }
    }
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
    });
    GroupStandings {
        group: group.group.clone(),
        rows,
    }
}

/// Tables for every group-stage pool, in fixture order.
pub fn compute_standings(fixtures: &[FixtureGroup]) -> Vec<GroupStandings> {
    fixtures
        .iter()
        .filter(|g| g.is_group_stage())
        .map(compute_group_standings)
        .collect()
}

/// Recompute all tables from scratch and refresh each team's cached stats.
pub fn refresh_standings(tournament: &mut Tournament) {
    tournament.standings = compute_standings(&tournament.fixtures);
    for team in &mut tournament.teams {
        team.stats = tournament
            .standings
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.team == team.name)
            .map(TeamStats::from_row)
            .unwrap_or_default();
    }
}
