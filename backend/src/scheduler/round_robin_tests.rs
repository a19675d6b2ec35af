use std::collections::{HashMap, HashSet};

use super::*;
use crate::models::{Gender, SportId, TeamId};

fn team(id: i64, name: &str) -> Team {
    Team {
        id: TeamId(id),
        name: name.to_string(),
        sport_id: SportId(1),
        division: "recreational".to_string(),
        gender: Gender::CoEd,
        captain: None,
        created_at: chrono::DateTime::UNIX_EPOCH,
    }
}

fn teams(n: usize) -> Vec<Team> {
    (1..=n as i64).map(|id| team(id, &format!("Team {}", id))).collect()
}

fn names<'a>(matchups: &[Matchup<'a>]) -> Vec<(&'a str, &'a str)> {
    matchups
        .iter()
        .map(|m| (m.home.name.as_str(), m.away.name.as_str()))
        .collect()
}

#[test]
fn test_empty_and_single_team_produce_nothing() {
    assert!(generate_round_robin(&[]).is_empty());
    assert!(generate_round_robin(&teams(1)).is_empty());
    assert!(generate_rounds(&teams(1)).is_empty());
}

#[test]
fn test_two_teams_play_once() {
    let input = teams(2);
    let rounds = generate_rounds(&input);

    assert_eq!(rounds.len(), 1);
    assert_eq!(names(&rounds[0].matchups), vec![("Team 1", "Team 2")]);
    assert_eq!(rounds[0].bye, None);
}

#[test]
fn test_four_teams_golden_order() {
    let input = vec![team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
    let matchups = generate_round_robin(&input);

    assert_eq!(
        names(&matchups),
        vec![
            ("A", "D"),
            ("C", "B"),
            ("A", "C"),
            ("B", "D"),
            ("A", "B"),
            ("D", "C"),
        ]
    );
}

#[test]
fn test_four_teams_round_structure() {
    let input = vec![team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
    let rounds = generate_rounds(&input);

    assert_eq!(rounds.len(), 3);
    assert_eq!(
        rounds.iter().map(|r| r.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(rounds.iter().all(|r| r.matchups.len() == 2 && r.bye.is_none()));
}

#[test]
fn test_three_teams_golden_order_with_byes() {
    let input = vec![team(1, "A"), team(2, "B"), team(3, "C")];
    let rounds = generate_rounds(&input);

    // Working order per round: [A,B,C,bye], [A,bye,B,C], [A,C,bye,B]
    assert_eq!(rounds.len(), 3);
    assert_eq!(names(&rounds[0].matchups), vec![("C", "B")]);
    assert_eq!(rounds[0].bye.map(|t| t.name.as_str()), Some("A"));
    assert_eq!(names(&rounds[1].matchups), vec![("A", "C")]);
    assert_eq!(rounds[1].bye.map(|t| t.name.as_str()), Some("B"));
    assert_eq!(names(&rounds[2].matchups), vec![("A", "B")]);
    assert_eq!(rounds[2].bye.map(|t| t.name.as_str()), Some("C"));
}

#[test]
fn test_every_pair_exactly_once() {
    for n in 2..=15 {
        let input = teams(n);
        let matchups = generate_round_robin(&input);
        assert_eq!(matchups.len(), matchup_count(n), "n = {}", n);

        let mut seen = HashSet::new();
        for m in &matchups {
            assert_ne!(m.home.id, m.away.id, "self-play for n = {}", n);
            let key = (m.home.id.min(m.away.id), m.home.id.max(m.away.id));
            assert!(seen.insert(key), "pair {:?} repeated for n = {}", key, n);
        }
        assert_eq!(seen.len(), n * (n - 1) / 2);
    }
}

#[test]
fn test_odd_counts_rotate_the_bye_through_every_team() {
    for n in [3usize, 5, 7, 9] {
        let input = teams(n);
        let rounds = generate_rounds(&input);
        assert_eq!(rounds.len(), n);

        let byes: Vec<TeamId> = rounds
            .iter()
            .map(|r| r.bye.expect("odd rounds always have a bye").id)
            .collect();
        let distinct: HashSet<_> = byes.iter().copied().collect();
        assert_eq!(distinct.len(), n, "n = {}", n);

        for round in &rounds {
            let bye = round.bye.map(|t| t.id);
            assert!(round
                .matchups
                .iter()
                .all(|m| Some(m.home.id) != bye && Some(m.away.id) != bye));
        }
    }
}

#[test]
fn test_each_team_plays_once_per_round() {
    let input = teams(8);
    for round in generate_rounds(&input) {
        let mut playing = HashSet::new();
        for m in &round.matchups {
            assert!(playing.insert(m.home.id));
            assert!(playing.insert(m.away.id));
        }
        assert_eq!(playing.len(), 8);
    }
}

#[test]
fn test_output_is_deterministic() {
    let input = teams(9);
    let first = names(&generate_round_robin(&input));
    let second = names(&generate_round_robin(&input));
    assert_eq!(first, second);
}

#[test]
fn test_output_follows_input_order() {
    let forward = vec![team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
    let reversed: Vec<Team> = forward.iter().rev().cloned().collect();

    let a = names(&generate_round_robin(&forward));
    let b = names(&generate_round_robin(&reversed));
    assert_ne!(a, b);
    assert_eq!(b[0], ("D", "A"));
}

#[test]
fn test_home_games_per_team_sum_to_total() {
    let input = teams(6);
    let matchups = generate_round_robin(&input);
    let mut home: HashMap<TeamId, usize> = HashMap::new();
    for m in &matchups {
        *home.entry(m.home.id).or_default() += 1;
    }
    assert_eq!(home.values().sum::<usize>(), matchups.len());
}

#[test]
fn test_matchup_count() {
    assert_eq!(matchup_count(0), 0);
    assert_eq!(matchup_count(1), 0);
    assert_eq!(matchup_count(2), 1);
    assert_eq!(matchup_count(5), 10);
    assert_eq!(matchup_count(6), 15);
}

#[test]
#[should_panic(expected = "duplicate team ids")]
#[cfg(debug_assertions)]
fn test_duplicate_ids_fail_loudly_in_debug() {
    let input = vec![team(1, "A"), team(1, "A again")];
    let _ = generate_round_robin(&input);
}
