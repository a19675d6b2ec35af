//! Game repository trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::RepositoryResult;
use crate::models::{Game, GameFilter, GameId, GameUpdate, NewGame};

/// Key recorded alongside a generated schedule so a repeated request can be
/// recognised. See [`crate::db::checksum::generation_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationKey(pub String);

impl GenerationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Idempotency record written in the same transaction as a generated season.
///
/// `fingerprint` identifies the request parameters (see
/// [`crate::db::checksum::request_fingerprint`]) so a key reused with a
/// different request can be told apart from a genuine retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub key: GenerationKey,
    pub fingerprint: String,
}

/// A generation found under its key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredGeneration {
    pub fingerprint: String,
    pub games: Vec<Game>,
}

/// Repository trait for game records.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Store a single game.
    async fn create_game(&self, game: &NewGame) -> RepositoryResult<Game>;

    /// Store every record in one all-or-nothing write.
    ///
    /// When `generation` is given it is recorded in the same write, mapped
    /// to the ids of the inserted games. A key that is already recorded is a
    /// `Conflict` and nothing is written.
    ///
    /// # Returns
    /// * `Ok(Vec<Game>)` - The stored games, in input order
    /// * `Err(RepositoryError::TransactionError)` - Nothing was written
    async fn bulk_insert_games(
        &self,
        games: &[NewGame],
        generation: Option<&GenerationRecord>,
    ) -> RepositoryResult<Vec<Game>>;

    /// The generation recorded under `key` by an earlier bulk insert, if any.
    ///
    /// A generation is only returned whole: once any of its games has been
    /// deleted the key is forgotten and `Ok(None)` is returned.
    async fn find_generation(
        &self,
        key: &GenerationKey,
    ) -> RepositoryResult<Option<StoredGeneration>>;

    async fn get_game(&self, game_id: GameId) -> RepositoryResult<Option<Game>>;

    /// List games matching `filter`, ordered by scheduled time then id.
    async fn list_games(&self, filter: &GameFilter) -> RepositoryResult<Vec<Game>>;

    /// Apply a partial update. Returns `Err(NotFound)` if the game does not exist.
    async fn update_game(&self, game_id: GameId, update: &GameUpdate) -> RepositoryResult<Game>;

    /// Delete a game. Returns `Err(NotFound)` if it does not exist.
    async fn delete_game(&self, game_id: GameId) -> RepositoryResult<()>;

    /// Delete every listed game that exists, returning how many were removed.
    async fn delete_games(&self, game_ids: &[GameId]) -> RepositoryResult<usize>;
}
