//! Single-elimination bracket: pairings, round names, coordinates and winner propagation.

use crate::ids::IdGenerator;
use crate::models::{
    BracketCoordinate, BracketData, BracketResult, FixtureGroup, Match, Stage, BYE,
};

/// Fixtures and visualization data for a freshly generated bracket.
#[derive(Clone, Debug)]
pub struct KnockoutStructure {
    pub bracket_data: BracketData,
    pub fixtures: Vec<FixtureGroup>,
}

/// `ceil(log2(slots))`: number of rounds needed to reduce `slots` entrants to one.
pub fn total_rounds(slots: usize) -> usize {
    if slots < 2 {
        return 0;
    }
    slots.next_power_of_two().trailing_zeros() as usize
}

/// Matches in round `round` (0 = first round) for `slots` entrants.
/// Rounds with an odd number of feeders get one extra match that is a BYE.
pub fn matches_in_round(slots: usize, round: usize) -> usize {
    slots.div_ceil(1 << (round + 1))
}

/// Display name of a round with `num_matches` matches.
pub fn round_name(num_matches: usize) -> String {
    match num_matches {
        1 => "Final".to_string(),
        2 => "Semifinal".to_string(),
        4 => "Quarterfinal".to_string(),
        n => format!("Round of {}", n * 2),
    }
}

/// Build a bracket from teams already in seeding order.
///
/// Consecutive teams are paired in round 0; an odd count is padded with a BYE. Later
/// rounds start with empty slots, except that a match with no second feeder gets a BYE
/// as its second team. Teams facing a BYE are advanced right away.
pub fn generate_knockout(team_names: &[String], ids: &impl IdGenerator) -> KnockoutStructure {
    let mut slots = team_names.to_vec();
    if slots.len() % 2 != 0 {
        slots.push(BYE.to_string());
    }
    let pairs: Vec<[String; 2]> = slots
        .chunks_exact(2)
        .map(|pair| [pair[0].clone(), pair[1].clone()])
        .collect();

    let mut fixtures = Vec::new();
    let mut results = Vec::new();
    let mut feeders = 0;
    for round in 0..total_rounds(slots.len()) {
        let num_matches = matches_in_round(slots.len(), round);
        let name = round_name(num_matches);
        let matches = (0..num_matches)
            .map(|index| {
                let (team1, team2) = if round == 0 {
                    (Some(pairs[index][0].clone()), Some(pairs[index][1].clone()))
                } else if 2 * index + 1 >= feeders {
                    (None, Some(BYE.to_string()))
                } else {
                    (None, None)
                };
                Match::new(
                    ids.next_id(),
                    team1,
                    team2,
                    format!("{} - Match {}", name, index + 1),
                )
                .with_bracket(BracketCoordinate::new(round, index))
            })
            .collect();
        results.push(vec![BracketResult::default(); num_matches]);
        fixtures.push(FixtureGroup::new(name, Stage::Knockout, matches));
        feeders = num_matches;
    }

    let byes: Vec<(BracketCoordinate, String)> = fixtures
        .first()
        .map(|first| {
            first
                .matches
                .iter()
                .filter(|m| m.is_bye())
                .filter_map(|m| Some((m.bracket?, m.winner()?.to_string())))
                .collect()
        })
        .unwrap_or_default();
    for (coordinate, team) in byes {
        advance_winner(&mut fixtures, coordinate, &team);
    }

    log::debug!(
        "Generated bracket for {} teams: {} rounds",
        team_names.len(),
        fixtures.len()
    );
    KnockoutStructure {
        bracket_data: BracketData { teams: pairs, results },
        fixtures,
    }
}

/// Knockout match at a bracket coordinate.
pub fn match_at_mut(
    fixtures: &mut [FixtureGroup],
    coordinate: BracketCoordinate,
) -> Option<&mut Match> {
    fixtures
        .iter_mut()
        .filter(|g| g.stage == Stage::Knockout)
        .flat_map(|g| g.matches.iter_mut())
        .find(|m| m.bracket == Some(coordinate))
}

/// Write `winner` of the match at `from` into the next round: team1 for an even index,
/// team2 for an odd one. If the receiving match is a BYE the team keeps advancing.
/// Nothing happens for the final.
pub fn advance_winner(fixtures: &mut [FixtureGroup], from: BracketCoordinate, winner: &str) {
    let next = from.next();
    let bye_winner = {
        let Some(target) = match_at_mut(fixtures, next) else {
            return;
        };
        target.set_team(from.next_side(), winner.to_string());
        log::debug!(
            "{} advances to round {} match {}",
            winner,
            next.round,
            next.index
        );
        if target.is_bye() {
            target.winner().map(str::to_string)
        } else {
            None
        }
    };
    if let Some(team) = bye_winner {
        advance_winner(fixtures, next, &team);
    }
}

/// Undo what the match at `from` pushed into the next round. A BYE match it fed
/// is emptied further down as well.
pub fn withdraw_team(fixtures: &mut [FixtureGroup], from: BracketCoordinate) {
    let next = from.next();
    let was_bye = {
        let Some(target) = match_at_mut(fixtures, next) else {
            return;
        };
        let was_bye = target.is_bye();
        target.clear_team(from.next_side());
        was_bye
    };
    if was_bye {
        withdraw_team(fixtures, next);
    }
}
