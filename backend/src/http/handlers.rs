//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ClearScheduleResponse, CreateGameRequest, DivisionQuery, Game, GameFilter, GameListResponse,
    GameUpdate, GenerateScheduleRequest, GeneratedSchedule, HealthResponse, NewSport, NewTeam,
    Sport, SportListResponse, StandingsResponse, Team, TeamFilter, TeamListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{GameId, TeamId};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that choose their status code.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Sports
// =============================================================================

/// GET /v1/sports
pub async fn list_sports(State(state): State<AppState>) -> HandlerResult<SportListResponse> {
    let sports = db_services::list_sports(state.repository.as_ref()).await?;
    let total = sports.len();
    Ok(Json(SportListResponse { sports, total }))
}

/// POST /v1/sports
pub async fn create_sport(
    State(state): State<AppState>,
    Json(request): Json<NewSport>,
) -> CreatedResult<Sport> {
    let sport = db_services::create_sport(state.repository.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(sport)))
}

// =============================================================================
// Teams
// =============================================================================

/// GET /v1/teams?sport_id=&division=&gender=
pub async fn list_teams(
    State(state): State<AppState>,
    Query(filter): Query<TeamFilter>,
) -> HandlerResult<TeamListResponse> {
    let teams = db_services::list_teams(state.repository.as_ref(), &filter).await?;
    let total = teams.len();
    Ok(Json(TeamListResponse { teams, total }))
}

/// POST /v1/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<NewTeam>,
) -> CreatedResult<Team> {
    let team = db_services::create_team(state.repository.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /v1/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> HandlerResult<Team> {
    let team = db_services::get_team(state.repository.as_ref(), TeamId::new(team_id)).await?;
    Ok(Json(team))
}

/// DELETE /v1/teams/{team_id}
///
/// Fails with 409 while the team still has games.
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_team(state.repository.as_ref(), TeamId::new(team_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Games
// =============================================================================

/// GET /v1/games?sport_id=&team_id=&status=
pub async fn list_games(
    State(state): State<AppState>,
    Query(filter): Query<GameFilter>,
) -> HandlerResult<GameListResponse> {
    let games = db_services::list_games(state.repository.as_ref(), &filter).await?;
    let total = games.len();
    Ok(Json(GameListResponse { games, total }))
}

/// POST /v1/games
///
/// Rejects the game if the two teams may not meet.
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> CreatedResult<Game> {
    let game = services::create_game(
        state.repository.as_ref(),
        &state.scheduling.default_venue,
        &request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// GET /v1/games/{game_id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> HandlerResult<Game> {
    let game = db_services::get_game(state.repository.as_ref(), GameId::new(game_id)).await?;
    Ok(Json(game))
}

/// PATCH /v1/games/{game_id}
pub async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
    Json(update): Json<GameUpdate>,
) -> HandlerResult<Game> {
    let game =
        services::update_game(state.repository.as_ref(), GameId::new(game_id), &update).await?;
    Ok(Json(game))
}

/// DELETE /v1/games/{game_id}
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_game(state.repository.as_ref(), GameId::new(game_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Schedules
// =============================================================================

/// POST /v1/schedules/generate
///
/// Generate a full round-robin season for one division. Responds 201 with
/// the new games, or 200 with the earlier games when the idempotency key
/// was already used.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Json(request): Json<GenerateScheduleRequest>,
) -> CreatedResult<GeneratedSchedule> {
    let result = services::generate_schedule(
        state.repository.as_ref(),
        &state.locks,
        &state.scheduling.default_venue,
        &request,
    )
    .await?;

    let status = if result.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    tracing::info!(
        games = result.games.len(),
        replayed = result.replayed,
        "schedule generation finished"
    );
    Ok((status, Json(result)))
}

/// DELETE /v1/schedules?sport_id=&division=
pub async fn clear_schedule(
    State(state): State<AppState>,
    Query(query): Query<DivisionQuery>,
) -> HandlerResult<ClearScheduleResponse> {
    let deleted = services::clear_schedule(
        state.repository.as_ref(),
        &state.locks,
        query.sport_id,
        &query.division,
    )
    .await?;
    Ok(Json(ClearScheduleResponse { deleted }))
}

// =============================================================================
// Standings
// =============================================================================

/// GET /v1/standings?sport_id=&division=
pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<DivisionQuery>,
) -> HandlerResult<StandingsResponse> {
    let standings =
        services::division_standings(state.repository.as_ref(), query.sport_id, &query.division)
            .await?;
    Ok(Json(StandingsResponse {
        sport_id: query.sport_id,
        division: query.division,
        standings,
    }))
}
