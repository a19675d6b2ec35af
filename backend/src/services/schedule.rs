//! Season schedule generation for one sport/division.
//!
//! Generation runs under the division's lock: fetch the division's teams,
//! pair them round robin, re-check every pairing, date the games and store
//! them in a single bulk insert. Either the whole season is stored or
//! nothing is.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};

use super::locks::DivisionLocks;
use crate::db::checksum::{generation_key, request_fingerprint};
use crate::db::repository::{FullRepository, GenerationRecord, RepositoryError};
use crate::models::{Game, GameFilter, Gender, SportId, Team, TeamId};
use crate::scheduler::{
    assemble_schedule, check_pair, generate_round_robin, CompatibilityError, SchedulePlan,
};

/// Input for [`generate_schedule`].
///
/// Every field is optional at the type level so that a missing value is
/// reported by name instead of as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    #[serde(default, alias = "sportId")]
    pub sport_id: Option<SportId>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(
        default,
        alias = "startDate",
        with = "crate::models::time::option_flexible_datetime"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "gamesPerWeek")]
    pub games_per_week: Option<i64>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Only schedule teams of this gender category.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Caller-chosen key; repeating a request with the same key returns the
    /// schedule created the first time.
    #[serde(default, alias = "idempotencyKey")]
    pub idempotency_key: Option<String>,
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSchedule {
    pub message: String,
    pub games: Vec<Game>,
    /// `true` when the games come from an earlier request with the same key.
    pub replayed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("games_per_week must be a positive integer, got {0}")]
    InvalidGamesPerWeek(i64),

    #[error("Cannot generate schedule: not enough teams in division '{division}' (found {found}, need at least 2)")]
    NotEnoughTeams { division: String, found: usize },

    #[error("Generated pairing is invalid: {0}")]
    Compatibility(#[from] CompatibilityError),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

struct ValidatedRequest {
    sport_id: SportId,
    division: String,
    start_date: DateTime<Utc>,
    games_per_week: NonZeroUsize,
    venue: String,
    gender: Option<Gender>,
    idempotency_key: Option<String>,
}

fn validate_request(
    req: &GenerateScheduleRequest,
    default_venue: &str,
) -> Result<ValidatedRequest, ScheduleError> {
    let sport_id = req.sport_id.ok_or(ScheduleError::MissingField("sport_id"))?;
    let division = req
        .division
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(ScheduleError::MissingField("division"))?
        .to_string();
    let start_date = req
        .start_date
        .ok_or(ScheduleError::MissingField("start_date"))?;
    let raw_per_week = req
        .games_per_week
        .ok_or(ScheduleError::MissingField("games_per_week"))?;
    let games_per_week = usize::try_from(raw_per_week)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(ScheduleError::InvalidGamesPerWeek(raw_per_week))?;
    let venue = req
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default_venue)
        .to_string();
    let idempotency_key = req
        .idempotency_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);

    Ok(ValidatedRequest {
        sport_id,
        division,
        start_date,
        games_per_week,
        venue,
        gender: req.gender,
        idempotency_key,
    })
}

/// Games of `sport_id` played by any of `teams`.
async fn existing_games<R: FullRepository + ?Sized>(
    repo: &R,
    sport_id: SportId,
    teams: &[Team],
) -> Result<Vec<Game>, RepositoryError> {
    let ids: HashSet<TeamId> = teams.iter().map(|t| t.id).collect();
    let games = repo
        .list_games(&GameFilter {
            sport_id: Some(sport_id),
            ..Default::default()
        })
        .await?;
    Ok(games
        .into_iter()
        .filter(|g| ids.contains(&g.home_team_id) || ids.contains(&g.away_team_id))
        .collect())
}

/// Generate and store a full round-robin season for one division.
///
/// # Errors
/// * `MissingField` / `InvalidGamesPerWeek` - bad request
/// * `NotEnoughTeams` - fewer than two teams; nothing is stored
/// * `Conflict` - the division already has games, or the idempotency key
///   was used for a different request
/// * `Repository` - the bulk insert failed; nothing is stored
pub async fn generate_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    locks: &DivisionLocks,
    default_venue: &str,
    req: &GenerateScheduleRequest,
) -> Result<GeneratedSchedule, ScheduleError> {
    let req = validate_request(req, default_venue)?;
    let _guard = locks.acquire(req.sport_id, &req.division).await;

    let generation = req.idempotency_key.as_deref().map(|k| GenerationRecord {
        key: generation_key(req.sport_id, &req.division, k),
        fingerprint: request_fingerprint(
            req.gender,
            req.start_date,
            req.games_per_week.get(),
            &req.venue,
        ),
    });
    if let Some(ref generation) = generation {
        if let Some(stored) = repo.find_generation(&generation.key).await? {
            if stored.fingerprint != generation.fingerprint {
                warn!(
                    "Idempotency key reused with different parameters for sport {} division '{}'",
                    req.sport_id, req.division
                );
                return Err(ScheduleError::Conflict(format!(
                    "Idempotency key was already used for a different schedule request in division '{}'",
                    req.division
                )));
            }
            info!(
                "Schedule for sport {} division '{}' already generated under this key, returning {} games",
                req.sport_id,
                req.division,
                stored.games.len()
            );
            return Ok(GeneratedSchedule {
                message: format!("Schedule already generated: {} games", stored.games.len()),
                games: stored.games,
                replayed: true,
            });
        }
    }

    let mut teams = repo.fetch_teams(req.sport_id, &req.division).await?;
    if let Some(gender) = req.gender {
        teams.retain(|t| t.gender == gender);
    }
    if teams.len() < 2 {
        warn!(
            "Refusing to generate schedule for sport {} division '{}': {} team(s)",
            req.sport_id,
            req.division,
            teams.len()
        );
        return Err(ScheduleError::NotEnoughTeams {
            division: req.division,
            found: teams.len(),
        });
    }

    let existing = existing_games(repo, req.sport_id, &teams).await?;
    if !existing.is_empty() {
        return Err(ScheduleError::Conflict(format!(
            "A schedule already exists for division '{}' ({} games); clear it before generating again",
            req.division,
            existing.len()
        )));
    }

    let matchups = generate_round_robin(&teams);
    for matchup in &matchups {
        check_pair(matchup.home, matchup.away)?;
    }
    debug!(
        "Paired {} teams into {} matchups for division '{}'",
        teams.len(),
        matchups.len(),
        req.division
    );

    let plan = SchedulePlan {
        sport_id: req.sport_id,
        gender: teams[0].gender,
        start_date: req.start_date,
        games_per_week: req.games_per_week,
        venue: req.venue,
    };
    let records = assemble_schedule(&matchups, &plan);
    let games = repo.bulk_insert_games(&records, generation.as_ref()).await?;

    info!(
        "Generated {} games for {} teams in sport {} division '{}'",
        games.len(),
        teams.len(),
        req.sport_id,
        req.division
    );
    Ok(GeneratedSchedule {
        message: format!(
            "Schedule generated: {} games for {} teams",
            games.len(),
            teams.len()
        ),
        games,
        replayed: false,
    })
}

/// Delete every game of one division so its schedule can be regenerated.
///
/// Returns the number of games removed.
pub async fn clear_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    locks: &DivisionLocks,
    sport_id: SportId,
    division: &str,
) -> Result<usize, ScheduleError> {
    let division = division.trim();
    if division.is_empty() {
        return Err(ScheduleError::MissingField("division"));
    }
    let _guard = locks.acquire(sport_id, division).await;

    let teams = repo.fetch_teams(sport_id, division).await?;
    let ids: Vec<_> = existing_games(repo, sport_id, &teams)
        .await?
        .into_iter()
        .map(|g| g.id)
        .collect();
    let deleted = repo.delete_games(&ids).await?;
    info!(
        "Cleared {} games from sport {} division '{}'",
        deleted, sport_id, division
    );
    Ok(deleted)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
