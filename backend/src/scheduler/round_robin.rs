//! Round-robin matchup generation (circle method).
//!
//! Every team plays every other team exactly once. With an odd number of
//! teams a bye slot is added to the rotation so exactly one team sits out
//! each round.
//!
//! ```text
//! round 1        round 2        round 3
//! A ── D         A ── C         A ── B
//! B ── C         D ── B         C ── D
//! ```
//!
//! Slot 0 stays fixed; after each round the last slot moves to position 1.
//! Pairs at odd positions within a round swap home and away.

use std::collections::HashSet;

use crate::models::Team;

/// One proposed home/away pairing, before a date is assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matchup<'a> {
    pub home: &'a Team,
    pub away: &'a Team,
}

/// All matchups of a single round, plus the team sitting out (odd counts only).
#[derive(Debug, Clone, PartialEq)]
pub struct Round<'a> {
    /// 1-based round number.
    pub number: usize,
    pub matchups: Vec<Matchup<'a>>,
    pub bye: Option<&'a Team>,
}

#[derive(Debug, Clone, Copy)]
enum Slot<'a> {
    Team(&'a Team),
    Bye,
}

/// Number of matchups a full round robin over `team_count` teams produces.
pub fn matchup_count(team_count: usize) -> usize {
    team_count * team_count.saturating_sub(1) / 2
}

/// Generate the round-by-round schedule for `teams`.
///
/// Output order is fully determined by input order. Team ids must be
/// distinct; this is checked in debug builds only.
pub fn generate_rounds(teams: &[Team]) -> Vec<Round<'_>> {
    debug_assert!(
        has_distinct_ids(teams),
        "round robin input contains duplicate team ids"
    );

    if teams.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Slot<'_>> = teams.iter().map(Slot::Team).collect();
    if slots.len() % 2 == 1 {
        slots.push(Slot::Bye);
    }

    let size = slots.len();
    let mut rounds = Vec::with_capacity(size - 1);

    for number in 1..size {
        let mut matchups = Vec::with_capacity(size / 2);
        let mut bye = None;

        for i in 0..size / 2 {
            match (slots[i], slots[size - 1 - i]) {
                (Slot::Team(first), Slot::Team(second)) => {
                    let (home, away) = if i % 2 == 0 {
                        (first, second)
                    } else {
                        (second, first)
                    };
                    matchups.push(Matchup { home, away });
                }
                (Slot::Team(team), Slot::Bye) | (Slot::Bye, Slot::Team(team)) => {
                    bye = Some(team);
                }
                (Slot::Bye, Slot::Bye) => {}
            }
        }

        rounds.push(Round {
            number,
            matchups,
            bye,
        });

        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    rounds
}

/// Generate the flat matchup list for `teams`, in round order.
///
/// Returns `teams.len() * (teams.len() - 1) / 2` matchups; fewer than two
/// teams yields an empty list.
pub fn generate_round_robin(teams: &[Team]) -> Vec<Matchup<'_>> {
    generate_rounds(teams)
        .into_iter()
        .flat_map(|round| round.matchups)
        .collect()
}

fn has_distinct_ids(teams: &[Team]) -> bool {
    let mut seen = HashSet::with_capacity(teams.len());
    teams.iter().all(|team| seen.insert(team.id))
}

#[cfg(test)]
#[path = "round_robin_tests.rs"]
mod tests;
