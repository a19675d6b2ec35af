//! High-level database service layer.
//!
//! Repository-agnostic operations for the plain CRUD records (sports, teams,
//! single games). Schedule generation and the compatibility-checked game
//! paths live in [`crate::services`].
//!
//! # Usage
//!
//! ```no_run
//! use intramural::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let sports = services::list_sports(&repo).await?;
//!     println!("Found {} sports", sports.len());
//!     Ok(())
//! }
//! ```

use log::{info, warn};

use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::{
    Game, GameFilter, GameId, NewSport, NewTeam, Sport, SportId, Team, TeamFilter, TeamId,
};

// ==================== Health & Connection ====================

/// Check if the store is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Sports ====================

/// Register a sport. The name is trimmed and must not be empty.
pub async fn create_sport<R: FullRepository + ?Sized>(
    repo: &R,
    sport: &NewSport,
) -> RepositoryResult<Sport> {
    if sport.name.trim().is_empty() {
        return Err(RepositoryError::validation("Sport name must not be empty"));
    }
    let stored = repo.create_sport(sport).await?;
    info!("Service layer: created sport {} ('{}')", stored.id, stored.name);
    Ok(stored)
}

pub async fn list_sports<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Sport>> {
    repo.list_sports().await
}

// ==================== Teams ====================

/// Register a team.
///
/// The sport must exist and the name and division must not be blank. The
/// division is stored trimmed, since schedule generation matches it exactly.
pub async fn create_team<R: FullRepository + ?Sized>(
    repo: &R,
    team: &NewTeam,
) -> RepositoryResult<Team> {
    if team.name.trim().is_empty() {
        return Err(RepositoryError::validation("Team name must not be empty"));
    }
    if team.division.trim().is_empty() {
        return Err(RepositoryError::validation("Team division must not be empty"));
    }
    ensure_sport_exists(repo, team.sport_id).await?;

    let mut normalized = team.clone();
    normalized.name = team.name.trim().to_string();
    normalized.division = team.division.trim().to_string();

    let stored = repo.create_team(&normalized).await?;
    info!(
        "Service layer: created team {} ('{}', sport={}, division={}, gender={})",
        stored.id, stored.name, stored.sport_id, stored.division, stored.gender
    );
    Ok(stored)
}

/// Retrieve a team, mapping a missing record to `NotFound`.
pub async fn get_team<R: FullRepository + ?Sized>(
    repo: &R,
    team_id: TeamId,
) -> RepositoryResult<Team> {
    repo.get_team(team_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found(format!("Team {} not found", team_id)))
}

pub async fn list_teams<R: FullRepository + ?Sized>(
    repo: &R,
    filter: &TeamFilter,
) -> RepositoryResult<Vec<Team>> {
    repo.list_teams(filter).await
}

pub async fn delete_team<R: FullRepository + ?Sized>(
    repo: &R,
    team_id: TeamId,
) -> RepositoryResult<()> {
    repo.delete_team(team_id).await.inspect_err(|e| {
        warn!("Service layer: failed to delete team {}: {}", team_id, e);
    })?;
    info!("Service layer: deleted team {}", team_id);
    Ok(())
}

// ==================== Games ====================

/// Retrieve a game, mapping a missing record to `NotFound`.
pub async fn get_game<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
) -> RepositoryResult<Game> {
    repo.get_game(game_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found(format!("Game {} not found", game_id)))
}

pub async fn list_games<R: FullRepository + ?Sized>(
    repo: &R,
    filter: &GameFilter,
) -> RepositoryResult<Vec<Game>> {
    repo.list_games(filter).await
}

pub async fn delete_game<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
) -> RepositoryResult<()> {
    repo.delete_game(game_id).await?;
    info!("Service layer: deleted game {}", game_id);
    Ok(())
}

async fn ensure_sport_exists<R: FullRepository + ?Sized>(
    repo: &R,
    sport_id: SportId,
) -> RepositoryResult<()> {
    match repo.get_sport(sport_id).await? {
        Some(_) => Ok(()),
        None => Err(RepositoryError::validation(format!(
            "Sport {} does not exist",
            sport_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::Gender;

    async fn seeded() -> (LocalRepository, Sport) {
        let repo = LocalRepository::new();
        let sport = create_sport(
            &repo,
            &NewSport {
                name: "Basketball".to_string(),
            },
        )
        .await
        .unwrap();
        (repo, sport)
    }

    #[tokio::test]
    async fn test_create_team_trims_fields() {
        let (repo, sport) = seeded().await;
        let team = create_team(
            &repo,
            &NewTeam::new("  Hawks ", sport.id, " competitive ", Gender::Men),
        )
        .await
        .unwrap();
        assert_eq!(team.name, "Hawks");
        assert_eq!(team.division, "competitive");
    }

    #[tokio::test]
    async fn test_create_team_requires_known_sport() {
        let (repo, _) = seeded().await;
        let err = create_team(
            &repo,
            &NewTeam::new("Hawks", SportId(42), "competitive", Gender::Men),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(repo.team_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_names_are_rejected() {
        let (repo, sport) = seeded().await;
        assert!(create_team(&repo, &NewTeam::new(" ", sport.id, "rec", Gender::Women))
            .await
            .is_err());
        assert!(create_team(&repo, &NewTeam::new("Owls", sport.id, "", Gender::Women))
            .await
            .is_err());
        assert!(create_sport(&repo, &NewSport { name: "".to_string() })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_missing_records_map_to_not_found() {
        let (repo, _) = seeded().await;
        assert!(get_team(&repo, TeamId(7)).await.unwrap_err().is_not_found());
        assert!(get_game(&repo, GameId(7)).await.unwrap_err().is_not_found());
        assert!(delete_game(&repo, GameId(7)).await.unwrap_err().is_not_found());
    }
}
