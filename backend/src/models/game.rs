//! Game records, their lifecycle status and partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Gender, GameId, SportId, TeamId};

/// Venue used when a game is created without one.
pub const DEFAULT_VENUE: &str = "TBD";

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Postponed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::InProgress => "in_progress",
            GameStatus::Completed => "completed",
            GameStatus::Cancelled => "cancelled",
            GameStatus::Postponed => "postponed",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(GameStatus::Scheduled),
            "in_progress" | "in-progress" => Ok(GameStatus::InProgress),
            "completed" => Ok(GameStatus::Completed),
            "cancelled" | "canceled" => Ok(GameStatus::Cancelled),
            "postponed" => Ok(GameStatus::Postponed),
            other => Err(format!("Unknown game status: {}", other)),
        }
    }
}

/// A persisted game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub sport_id: SportId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub gender: Gender,
    pub scheduled_at: DateTime<Utc>,
    pub venue: String,
    pub status: GameStatus,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Whether the given team plays in this game, home or away.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Final score as `(home, away)` once the game is completed and scored.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if self.status != GameStatus::Completed {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }
}

/// A game record ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub sport_id: SportId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub gender: Gender,
    pub scheduled_at: DateTime<Utc>,
    pub venue: String,
    pub status: GameStatus,
}

/// Partial update of a game. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameUpdate {
    #[serde(default)]
    pub home_team_id: Option<TeamId>,
    #[serde(default)]
    pub away_team_id: Option<TeamId>,
    #[serde(default, with = "crate::models::time::option_flexible_datetime")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub status: Option<GameStatus>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
}

impl GameUpdate {
    pub fn is_empty(&self) -> bool {
        self == &GameUpdate::default()
    }

    /// Apply the present fields onto `game`, bumping `updated_at`.
    pub fn apply_to(&self, game: &mut Game, now: DateTime<Utc>) {
        if let Some(id) = self.home_team_id {
            game.home_team_id = id;
        }
        if let Some(id) = self.away_team_id {
            game.away_team_id = id;
        }
        if let Some(at) = self.scheduled_at {
            game.scheduled_at = at;
        }
        if let Some(ref venue) = self.venue {
            game.venue = venue.clone();
        }
        if let Some(status) = self.status {
            game.status = status;
        }
        if let Some(score) = self.home_score {
            game.home_score = Some(score);
        }
        if let Some(score) = self.away_score {
            game.away_score = Some(score);
        }
        game.updated_at = now;
    }
}

/// Optional filters for listing games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameFilter {
    #[serde(default)]
    pub sport_id: Option<SportId>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub status: Option<GameStatus>,
}

impl GameFilter {
    pub fn matches(&self, game: &Game) -> bool {
        self.sport_id.map_or(true, |id| game.sport_id == id)
            && self.team_id.map_or(true, |id| game.involves(id))
            && self.status.map_or(true, |s| game.status == s)
    }
}
