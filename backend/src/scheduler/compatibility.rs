//! Compatibility rules for the two teams of a game.
//!
//! Two teams may meet only if both exist, they are different teams, and they
//! share division, gender category and sport. Each violation has its own
//! variant so the API layer can report exactly what is wrong.

use crate::models::{Gender, SportId, Team, TeamId};

/// Reason a proposed home/away pairing was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompatibilityError {
    #[error("Teams not found: {}", format_ids(.missing))]
    TeamsNotFound { missing: Vec<TeamId> },

    #[error("A team cannot play against itself (team {team_id})")]
    SameTeam { team_id: TeamId },

    #[error("Teams must be in the same division (home: '{home}', away: '{away}')")]
    DivisionMismatch { home: String, away: String },

    #[error("Teams must be in the same gender category (home: {home}, away: {away})")]
    GenderMismatch { home: Gender, away: Gender },

    #[error("Teams must play the same sport (home: {home}, away: {away})")]
    SportMismatch { home: SportId, away: SportId },
}

impl CompatibilityError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TeamsNotFound { .. } => "TEAMS_NOT_FOUND",
            Self::SameTeam { .. } => "SAME_TEAM",
            Self::DivisionMismatch { .. } => "DIVISION_MISMATCH",
            Self::GenderMismatch { .. } => "GENDER_MISMATCH",
            Self::SportMismatch { .. } => "SPORT_MISMATCH",
        }
    }
}

fn format_ids(ids: &[TeamId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check two looked-up teams. `None` means the lookup found nothing.
///
/// Rules are checked in order: existence, same team, division, gender, sport.
pub fn check_compatibility(
    home_id: TeamId,
    home: Option<&Team>,
    away_id: TeamId,
    away: Option<&Team>,
) -> Result<(), CompatibilityError> {
    let (home, away) = match (home, away) {
        (Some(h), Some(a)) => (h, a),
        (h, a) => {
            let mut missing = Vec::new();
            if h.is_none() {
                missing.push(home_id);
            }
            if a.is_none() && !missing.contains(&away_id) {
                missing.push(away_id);
            }
            return Err(CompatibilityError::TeamsNotFound { missing });
        }
    };

    check_pair(home, away)
}

/// Check two existing teams.
pub fn check_pair(home: &Team, away: &Team) -> Result<(), CompatibilityError> {
    if home.id == away.id {
        return Err(CompatibilityError::SameTeam { team_id: home.id });
    }
    if home.division != away.division {
        return Err(CompatibilityError::DivisionMismatch {
            home: home.division.clone(),
            away: away.division.clone(),
        });
    }
    if home.gender != away.gender {
        return Err(CompatibilityError::GenderMismatch {
            home: home.gender,
            away: away.gender,
        });
    }
    if home.sport_id != away.sport_id {
        return Err(CompatibilityError::SportMismatch {
            home: home.sport_id,
            away: away.sport_id,
        });
    }
    Ok(())
}
