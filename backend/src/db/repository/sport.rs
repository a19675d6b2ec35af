use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewSport, Sport, SportId};

/// Repository trait for the sport catalogue.
#[async_trait]
pub trait SportRepository: Send + Sync {
    /// Store a new sport. Names are unique, ignoring case; a duplicate is
    /// `Err(RepositoryError::Conflict)`.
    async fn create_sport(&self, sport: &NewSport) -> RepositoryResult<Sport>;

    async fn get_sport(&self, sport_id: SportId) -> RepositoryResult<Option<Sport>>;

    /// All sports ordered by id.
    async fn list_sports(&self) -> RepositoryResult<Vec<Sport>>;
}
