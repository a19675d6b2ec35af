//! Turns a flat matchup list into dated, persistable game records.

use chrono::{DateTime, Duration, Utc};
use std::num::NonZeroUsize;

use super::round_robin::Matchup;
use crate::models::{GameStatus, Gender, NewGame, SportId};

/// Calendar parameters shared by every game of a generated schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePlan {
    pub sport_id: SportId,
    pub gender: Gender,
    pub start_date: DateTime<Utc>,
    /// Matchups per week bucket.
    pub games_per_week: NonZeroUsize,
    pub venue: String,
}

/// Offset between consecutive week buckets.
pub fn week() -> Duration {
    Duration::days(7)
}

/// Date of the bucket that matchup `index` falls into.
pub fn bucket_date(plan: &SchedulePlan, index: usize) -> DateTime<Utc> {
    let weeks = (index / plan.games_per_week.get()) as i32;
    plan.start_date + week() * weeks
}

/// Build one `scheduled` game per matchup.
///
/// Matchup `i` lands in week `i / games_per_week`, starting at
/// `plan.start_date` and advancing seven days per bucket.
pub fn assemble_schedule(matchups: &[Matchup<'_>], plan: &SchedulePlan) -> Vec<NewGame> {
    let mut current_date = plan.start_date;

    matchups
        .iter()
        .enumerate()
        .map(|(i, matchup)| {
            if i > 0 && i % plan.games_per_week.get() == 0 {
                current_date += week();
            }
            NewGame {
                sport_id: plan.sport_id,
                home_team_id: matchup.home.id,
                away_team_id: matchup.away.id,
                gender: plan.gender,
                scheduled_at: current_date,
                venue: plan.venue.clone(),
                status: GameStatus::Scheduled,
            }
        })
        .collect()
}
