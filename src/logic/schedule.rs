//! Group stage scheduling: round-robin fixtures and partitioning the roster into pools.

use crate::ids::IdGenerator;
use crate::models::{FixtureGroup, Match, Stage};

/// Preferred pool size.
pub const TEAMS_PER_GROUP: usize = 4;

/// Round-robin schedule by the circle method.
///
/// An odd roster gets a sentinel "no opponent" slot; slot 0 stays fixed while the rest
/// rotate one position per round. Pairings against the sentinel are dropped, so with an
/// even count `n` there are `n - 1` rounds of `n / 2` matches and every pair meets once.
pub fn round_robin(team_names: &[String]) -> Vec<Vec<(String, String)>> {
    let mut slots: Vec<Option<&String>> = team_names.iter().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }
    let n = slots.len();
    if n < 2 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let round = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(home), Some(away)) => Some((home.clone(), away.clone())),
                _ => None,
            })
            .collect();
        rounds.push(round);
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }
    rounds
}

/// Number of pools for a roster: pools of up to 4, except 16 and 32 teams which are
/// always split into exactly 4 pools. Fewer than 4 teams share a single pool.
pub fn group_count(team_count: usize) -> usize {
    match team_count {
        16 | 32 => 4,
        n if n < TEAMS_PER_GROUP => 1,
        n => n.div_ceil(TEAMS_PER_GROUP),
    }
}

/// Label of the pool at `index` ("Group A", "Group B", ...).
pub fn group_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("Group {}", char::from(b'A' + i)),
        _ => format!("Group {}", index + 1),
    }
}

/// Split the roster (in order) into pools whose sizes differ by at most one.
pub fn partition_into_groups(team_names: &[String]) -> Vec<(String, Vec<String>)> {
    let groups = group_count(team_names.len());
    let base = team_names.len() / groups;
    let extra = team_names.len() % groups;

    let mut rest = team_names;
    (0..groups)
        .map(|i| {
            let size = if i < extra { base + 1 } else { base };
            let (pool, tail) = rest.split_at(size);
            rest = tail;
            (group_label(i), pool.to_vec())
        })
        .collect()
}

/// Build the group stage: one fixture group per pool, each scheduled round-robin.
/// Pools with fewer than 2 teams are dropped.
pub fn generate_group_fixtures(team_names: &[String], ids: &impl IdGenerator) -> Vec<FixtureGroup> {
    partition_into_groups(team_names)
        .into_iter()
        .filter(|(_, pool)| pool.len() >= 2)
        .map(|(label, pool)| {
            let mut matches = Vec::new();
            for (round, pairs) in round_robin(&pool).into_iter().enumerate() {
                for (home, away) in pairs {
                    matches.push(Match::new(
                        ids.next_id(),
                        Some(home),
                        Some(away),
                        format!("Round {}", round + 1),
                    ));
                }
            }
            FixtureGroup::new(label, Stage::Group, matches)
        })
        .collect()
}
