//! Single-game creation and updates.
//!
//! Both paths run the compatibility rules before anything is written.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{Game, GameId, GameStatus, GameUpdate, Gender, NewGame, SportId, TeamId};
use crate::scheduler::{check_compatibility, CompatibilityError};

/// Input for [`create_game`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default, alias = "sportId")]
    pub sport_id: Option<SportId>,
    #[serde(default, alias = "homeTeamId")]
    pub home_team_id: Option<TeamId>,
    #[serde(default, alias = "awayTeamId")]
    pub away_team_id: Option<TeamId>,
    /// Defaults to the teams' gender category.
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(
        default,
        alias = "scheduledAt",
        with = "crate::models::time::option_flexible_datetime"
    )]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub status: Option<GameStatus>,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error("Game {0} not found")]
    NotFound(GameId),

    #[error("Game sport {requested} does not match the teams' sport {teams}")]
    SportMismatch { requested: SportId, teams: SportId },

    #[error("Game gender category {requested} does not match the teams' category {teams}")]
    GenderMismatch { requested: Gender, teams: Gender },

    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Validate and store one game.
pub async fn create_game<R: FullRepository + ?Sized>(
    repo: &R,
    default_venue: &str,
    req: &CreateGameRequest,
) -> Result<Game, GameError> {
    let sport_id = req.sport_id.ok_or(GameError::MissingField("sport_id"))?;
    let home_id = req
        .home_team_id
        .ok_or(GameError::MissingField("home_team_id"))?;
    let away_id = req
        .away_team_id
        .ok_or(GameError::MissingField("away_team_id"))?;
    let scheduled_at = req
        .scheduled_at
        .ok_or(GameError::MissingField("scheduled_at"))?;

    let home = repo.get_team(home_id).await?;
    let away = repo.get_team(away_id).await?;
    check_compatibility(home_id, home.as_ref(), away_id, away.as_ref())?;
    let Some(home) = home else {
        return Err(CompatibilityError::TeamsNotFound {
            missing: vec![home_id],
        }
        .into());
    };

    if sport_id != home.sport_id {
        return Err(GameError::SportMismatch {
            requested: sport_id,
            teams: home.sport_id,
        });
    }
    let gender = match req.gender {
        Some(g) if g != home.gender => {
            return Err(GameError::GenderMismatch {
                requested: g,
                teams: home.gender,
            })
        }
        Some(g) => g,
        None => home.gender,
    };

    let venue = req
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default_venue)
        .to_string();

    let game = repo
        .create_game(&NewGame {
            sport_id,
            home_team_id: home_id,
            away_team_id: away_id,
            gender,
            scheduled_at,
            venue,
            status: req.status.unwrap_or_default(),
        })
        .await?;
    info!(
        "Created game {}: team {} vs team {} at {}",
        game.id, game.home_team_id, game.away_team_id, game.scheduled_at
    );
    Ok(game)
}

/// Apply a partial update to a game.
///
/// The pairing is re-validated when the update names both teams. An update
/// naming only one side is only checked against the game's other team, so a
/// game never ends up against itself; the store still rejects unknown ids.
pub async fn update_game<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
    update: &GameUpdate,
) -> Result<Game, GameError> {
    if update.is_empty() {
        return Err(GameError::EmptyUpdate);
    }
    let current = repo
        .get_game(game_id)
        .await?
        .ok_or(GameError::NotFound(game_id))?;

    if let (Some(home_id), Some(away_id)) = (update.home_team_id, update.away_team_id) {
        let home = repo.get_team(home_id).await?;
        let away = repo.get_team(away_id).await?;
        check_compatibility(home_id, home.as_ref(), away_id, away.as_ref())?;
        if let Some(home) = home {
            if home.sport_id != current.sport_id {
                return Err(GameError::SportMismatch {
                    requested: current.sport_id,
                    teams: home.sport_id,
                });
            }
            if home.gender != current.gender {
                return Err(GameError::GenderMismatch {
                    requested: current.gender,
                    teams: home.gender,
                });
            }
        }
    } else {
        let home_id = update.home_team_id.unwrap_or(current.home_team_id);
        let away_id = update.away_team_id.unwrap_or(current.away_team_id);
        if home_id == away_id {
            return Err(CompatibilityError::SameTeam { team_id: home_id }.into());
        }
    }

    let game = repo.update_game(game_id, update).await.map_err(|e| {
        if e.is_not_found() {
            GameError::NotFound(game_id)
        } else {
            GameError::Repository(e)
        }
    })?;
    info!("Updated game {} (status={})", game.id, game.status);
    Ok(game)
}
