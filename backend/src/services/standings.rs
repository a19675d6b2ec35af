//! Division standings from completed games.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{Game, GameFilter, GameStatus, SportId, Team, TeamId};

/// One row of a standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_differential: i64,
    /// Wins plus half the ties, over games played. `0.0` before any game.
    pub win_percentage: f64,
}

impl Standing {
    fn new(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0,
            points_against: 0,
            point_differential: 0,
            win_percentage: 0.0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        match scored.cmp(&conceded) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.ties += 1,
        }
        self.points_for += u64::from(scored);
        self.points_against += u64::from(conceded);
    }

    fn finish(&mut self) {
        self.point_differential = self.points_for as i64 - self.points_against as i64;
        self.win_percentage = if self.played == 0 {
            0.0
        } else {
            (f64::from(self.wins) + 0.5 * f64::from(self.ties)) / f64::from(self.played)
        };
    }
}

/// Build the standings for `teams` from the completed games among `games`.
///
/// Every team gets a row, even without games. Rows are ordered by wins,
/// then point differential (both descending), then team name.
pub fn compute_standings(teams: &[Team], games: &[Game]) -> Vec<Standing> {
    let mut table: HashMap<TeamId, Standing> =
        teams.iter().map(|t| (t.id, Standing::new(t))).collect();

    for game in games {
        let Some((home, away)) = game.final_score() else {
            continue;
        };
        if let Some(row) = table.get_mut(&game.home_team_id) {
            row.record(home, away);
        }
        if let Some(row) = table.get_mut(&game.away_team_id) {
            row.record(away, home);
        }
    }

    let mut rows: Vec<Standing> = table.into_values().collect();
    rows.iter_mut().for_each(Standing::finish);
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.point_differential.cmp(&a.point_differential))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    rows
}

/// Standings of one sport/division.
pub async fn division_standings<R: FullRepository + ?Sized>(
    repo: &R,
    sport_id: SportId,
    division: &str,
) -> RepositoryResult<Vec<Standing>> {
    let teams = repo.fetch_teams(sport_id, division.trim()).await?;
    let games = repo
        .list_games(&GameFilter {
            sport_id: Some(sport_id),
            status: Some(GameStatus::Completed),
            ..Default::default()
        })
        .await?;
    Ok(compute_standings(&teams, &games))
}
