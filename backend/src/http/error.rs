//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::scheduler::CompatibilityError;
use crate::services::{GameError, ScheduleError};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Request collides with existing state
    Conflict(String),
    /// Internal server error
    Internal(String),
    /// Two teams that may not meet
    Compatibility(CompatibilityError),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Compatibility(e) => {
                let status = match e {
                    CompatibilityError::TeamsNotFound { .. } => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, ApiError::new(e.code(), e.to_string()))
            }
            AppError::Repository(e) => {
                let msg = e.to_string();
                match e {
                    RepositoryError::NotFound { .. } => {
                        (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg))
                    }
                    RepositoryError::Conflict { .. } => {
                        (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg))
                    }
                    RepositoryError::ValidationError { .. } => {
                        (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
                    }
                    _ => {
                        let mut body = ApiError::new("REPOSITORY_ERROR", msg);
                        if e.is_retryable() {
                            body = body.with_details("retryable");
                        }
                        (StatusCode::INTERNAL_SERVER_ERROR, body)
                    }
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.message);
        } else {
            tracing::debug!(code = %error.code, status = %status, "{}", error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<CompatibilityError> for AppError {
    fn from(err: CompatibilityError) -> Self {
        AppError::Compatibility(err)
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::Compatibility(e) => AppError::Compatibility(e),
            ScheduleError::Conflict(msg) => AppError::Conflict(msg),
            ScheduleError::Repository(e) => AppError::Repository(e),
            other @ (ScheduleError::MissingField(_)
            | ScheduleError::InvalidGamesPerWeek(_)
            | ScheduleError::NotEnoughTeams { .. }) => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NotFound(_) => AppError::NotFound(err.to_string()),
            GameError::Compatibility(e) => AppError::Compatibility(e),
            GameError::Repository(e) => AppError::Repository(e),
            GameError::SportMismatch { requested, teams } => {
                AppError::Compatibility(CompatibilityError::SportMismatch {
                    home: teams,
                    away: requested,
                })
            }
            GameError::GenderMismatch { requested, teams } => {
                AppError::Compatibility(CompatibilityError::GenderMismatch {
                    home: teams,
                    away: requested,
                })
            }
            GameError::MissingField(_) | GameError::EmptyUpdate => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;
    use crate::models::{Gender, SportId, TeamId};

    #[test]
    fn test_compatibility_codes() {
        let (status, body) = AppError::from(CompatibilityError::DivisionMismatch {
            home: "competitive".to_string(),
            away: "recreational".to_string(),
        })
        .status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "DIVISION_MISMATCH");

        let (status, body) = AppError::from(CompatibilityError::TeamsNotFound {
            missing: vec![TeamId(3)],
        })
        .status_and_body();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "TEAMS_NOT_FOUND");
    }

    #[test]
    fn test_schedule_errors() {
        let (status, _) = AppError::from(ScheduleError::NotEnoughTeams {
            division: "rec".to_string(),
            found: 1,
        })
        .status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            AppError::from(ScheduleError::Conflict("exists".to_string())).status_and_body();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "CONFLICT");
    }

    #[test]
    fn test_game_mismatch_uses_compatibility_codes() {
        let (_, body) = AppError::from(GameError::GenderMismatch {
            requested: Gender::CoEd,
            teams: Gender::Men,
        })
        .status_and_body();
        assert_eq!(body.code, "GENDER_MISMATCH");

        let (_, body) = AppError::from(GameError::SportMismatch {
            requested: SportId(2),
            teams: SportId(1),
        })
        .status_and_body();
        assert_eq!(body.code, "SPORT_MISMATCH");
    }

    #[test]
    fn test_repository_errors() {
        let cases = [
            (RepositoryError::not_found("x"), StatusCode::NOT_FOUND),
            (RepositoryError::conflict("x"), StatusCode::CONFLICT),
            (RepositoryError::validation("x"), StatusCode::BAD_REQUEST),
            (
                RepositoryError::transaction_with_context("x", ErrorContext::default()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_and_body().0, expected);
        }
    }
}
