//! Team repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewTeam, SportId, Team, TeamFilter, TeamId};

/// Repository trait for team records.
///
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a new team and return it with its assigned id.
    async fn create_team(&self, team: &NewTeam) -> RepositoryResult<Team>;

    /// Retrieve a team by id.
    ///
    /// # Returns
    /// * `Ok(Some(Team))` - The team
    /// * `Ok(None)` - No team with that id
    async fn get_team(&self, team_id: TeamId) -> RepositoryResult<Option<Team>>;

    /// List teams matching `filter`, ordered by id.
    async fn list_teams(&self, filter: &TeamFilter) -> RepositoryResult<Vec<Team>>;

    /// All teams of one sport and division, ordered by id.
    ///
    /// The order is what makes generated schedules reproducible.
    async fn fetch_teams(&self, sport_id: SportId, division: &str) -> RepositoryResult<Vec<Team>> {
        self.list_teams(&TeamFilter {
            sport_id: Some(sport_id),
            division: Some(division.to_string()),
            gender: None,
        })
        .await
    }

    /// Delete a team. Returns `Err(NotFound)` if it does not exist.
    async fn delete_team(&self, team_id: TeamId) -> RepositoryResult<()>;
}
