//! Data Transfer Objects for the HTTP API.
//!
//! Record types and service requests already derive Serialize/Deserialize
//! and are re-exported here; the rest are response envelopes and query
//! strings.

use serde::{Deserialize, Serialize};

pub use crate::models::{
    Game, GameFilter, GameUpdate, NewSport, NewTeam, Sport, SportId, Team, TeamFilter,
};
pub use crate::services::{CreateGameRequest, GenerateScheduleRequest, GeneratedSchedule, Standing};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportListResponse {
    pub sports: Vec<Sport>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamListResponse {
    pub teams: Vec<Team>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameListResponse {
    pub games: Vec<Game>,
    pub total: usize,
}

/// Query string naming one division: `?sport_id=1&division=competitive`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionQuery {
    pub sport_id: SportId,
    pub division: String,
}

/// Response for clearing a division's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearScheduleResponse {
    pub deleted: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub sport_id: SportId,
    pub division: String,
    pub standings: Vec<Standing>,
}
