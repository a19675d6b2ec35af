//! In-memory local repository implementation.
//!
//! Stores everything in ordered maps behind a single lock, so every
//! operation (including the bulk insert) is atomic with respect to the
//! others. Suitable for unit tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{
    Game, GameFilter, GameId, GameUpdate, NewGame, NewSport, NewTeam, Sport, SportId, Team,
    TeamFilter, TeamId,
};

/// In-memory local repository.
///
/// Cloning shares the underlying data.
///
/// # Example
/// ```
/// use intramural::db::repositories::LocalRepository;
/// use intramural::db::repository::TeamRepository;
/// use intramural::models::{Gender, NewTeam, SportId};
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new();
/// let team = NewTeam::new("Hawks", SportId(1), "recreational", Gender::CoEd);
/// let stored = repo.create_team(&team).await.unwrap();
/// assert_eq!(repo.get_team(stored.id).await.unwrap(), Some(stored));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

/// Fingerprint and game ids recorded for one generation key.
struct StoredIds {
    fingerprint: String,
    game_ids: Vec<GameId>,
}

struct LocalData {
    teams: BTreeMap<TeamId, Team>,
    games: BTreeMap<GameId, Game>,
    sports: BTreeMap<SportId, Sport>,
    generations: HashMap<GenerationKey, StoredIds>,

    // ID counters
    next_team_id: i64,
    next_game_id: i64,
    next_sport_id: i64,

    // Failure injection
    is_healthy: bool,
    fail_writes: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            teams: BTreeMap::new(),
            games: BTreeMap::new(),
            sports: BTreeMap::new(),
            generations: HashMap::new(),
            next_team_id: 1,
            next_game_id: 1,
            next_sport_id: 1,
            is_healthy: true,
            fail_writes: false,
        }
    }
}

impl LocalData {
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }

    fn check_writable(&self, operation: &str) -> RepositoryResult<()> {
        self.check_health()?;
        if self.fail_writes {
            return Err(RepositoryError::transaction_with_context(
                "Write rejected by store",
                ErrorContext::new(operation).with_details("write failure injected"),
            ));
        }
        Ok(())
    }

    fn check_teams_exist(&self, game: &NewGame) -> RepositoryResult<()> {
        for id in [game.home_team_id, game.away_team_id] {
            if !self.teams.contains_key(&id) {
                return Err(RepositoryError::validation(format!(
                    "Game references unknown team {}",
                    id
                ))
                .with_entity("team", id));
            }
        }
        Ok(())
    }

    fn insert_game(&mut self, game: &NewGame) -> Game {
        let id = GameId(self.next_game_id);
        self.next_game_id += 1;
        let now = Utc::now();
        let stored = Game {
            id,
            sport_id: game.sport_id,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            gender: game.gender,
            scheduled_at: game.scheduled_at,
            venue: game.venue.clone(),
            status: game.status,
            home_score: None,
            away_score: None,
            created_at: now,
            updated_at: now,
        };
        self.games.insert(id, stored.clone());
        stored
    }

    /// Drop every generation that lost a game, so a key never replays a
    /// partial season.
    fn forget_deleted_generations(&mut self) {
        let games = &self.games;
        self.generations.retain(|_, stored| {
            stored.game_ids.iter().all(|id| games.contains_key(id))
        });
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make every write fail with a transaction error while reads keep working.
    pub fn set_fail_writes(&self, fail: bool) {
        self.data.write().fail_writes = fail;
    }

    /// Clear all data from the repository. Failure flags are kept.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            fail_writes: data.fail_writes,
            ..Default::default()
        };
    }

    pub fn team_count(&self) -> usize {
        self.data.read().teams.len()
    }

    pub fn game_count(&self) -> usize {
        self.data.read().games.len()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create_team(&self, team: &NewTeam) -> RepositoryResult<Team> {
        let mut data = self.data.write();
        data.check_writable("create_team")?;

        let id = TeamId(data.next_team_id);
        data.next_team_id += 1;
        let stored = Team {
            id,
            name: team.name.clone(),
            sport_id: team.sport_id,
            division: team.division.clone(),
            gender: team.gender,
            captain: team.captain.clone(),
            created_at: Utc::now(),
        };
        data.teams.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_team(&self, team_id: TeamId) -> RepositoryResult<Option<Team>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.teams.get(&team_id).cloned())
    }

    async fn list_teams(&self, filter: &TeamFilter) -> RepositoryResult<Vec<Team>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data
            .teams
            .values()
            .filter(|team| filter.matches(team))
            .cloned()
            .collect())
    }

    async fn delete_team(&self, team_id: TeamId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        data.check_writable("delete_team")?;

        if !data.teams.contains_key(&team_id) {
            return Err(RepositoryError::not_found_with_context(
                format!("Team {} not found", team_id),
                ErrorContext::new("delete_team")
                    .with_entity("team")
                    .with_entity_id(team_id),
            ));
        }
        if data.games.values().any(|game| game.involves(team_id)) {
            return Err(RepositoryError::conflict(format!(
                "Team {} still has games on the schedule",
                team_id
            ))
            .with_entity("team", team_id));
        }
        data.teams.remove(&team_id);
        Ok(())
    }
}

#[async_trait]
impl GameRepository for LocalRepository {
    async fn create_game(&self, game: &NewGame) -> RepositoryResult<Game> {
        let mut data = self.data.write();
        data.check_writable("create_game")?;
        data.check_teams_exist(game)?;
        Ok(data.insert_game(game))
    }

    async fn bulk_insert_games(
        &self,
        games: &[NewGame],
        generation: Option<&GenerationRecord>,
    ) -> RepositoryResult<Vec<Game>> {
        let mut data = self.data.write();
        data.check_writable("bulk_insert_games")?;

        // Validate everything up front so a rejected record leaves no trace.
        for game in games {
            data.check_teams_exist(game)
                .map_err(|e| e.with_operation("bulk_insert_games"))?;
        }
        if let Some(record) = generation {
            if data.generations.contains_key(&record.key) {
                return Err(RepositoryError::conflict(format!(
                    "Generation {} already recorded",
                    record.key.as_str()
                ))
                .with_operation("bulk_insert_games"));
            }
        }

        let stored: Vec<Game> = games.iter().map(|game| data.insert_game(game)).collect();
        if let Some(record) = generation {
            data.generations.insert(
                record.key.clone(),
                StoredIds {
                    fingerprint: record.fingerprint.clone(),
                    game_ids: stored.iter().map(|g| g.id).collect(),
                },
            );
        }
        Ok(stored)
    }

    async fn find_generation(
        &self,
        key: &GenerationKey,
    ) -> RepositoryResult<Option<StoredGeneration>> {
        let data = self.data.read();
        data.check_health()?;

        let Some(stored) = data.generations.get(key) else {
            return Ok(None);
        };
        let games: Option<Vec<Game>> = stored
            .game_ids
            .iter()
            .map(|id| data.games.get(id).cloned())
            .collect();
        Ok(games.map(|games| StoredGeneration {
            fingerprint: stored.fingerprint.clone(),
            games,
        }))
    }

    async fn get_game(&self, game_id: GameId) -> RepositoryResult<Option<Game>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.games.get(&game_id).cloned())
    }

    async fn list_games(&self, filter: &GameFilter) -> RepositoryResult<Vec<Game>> {
        let data = self.data.read();
        data.check_health()?;
        let mut games: Vec<Game> = data
            .games
            .values()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect();
        games.sort_by_key(|game| (game.scheduled_at, game.id));
        Ok(games)
    }

    async fn update_game(&self, game_id: GameId, update: &GameUpdate) -> RepositoryResult<Game> {
        let mut data = self.data.write();
        data.check_writable("update_game")?;

        for id in [update.home_team_id, update.away_team_id].into_iter().flatten() {
            if !data.teams.contains_key(&id) {
                return Err(RepositoryError::validation(format!(
                    "Game references unknown team {}",
                    id
                ))
                .with_entity("team", id));
            }
        }

        let game = data.games.get_mut(&game_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Game {} not found", game_id),
                ErrorContext::new("update_game")
                    .with_entity("game")
                    .with_entity_id(game_id),
            )
        })?;
        update.apply_to(game, Utc::now());
        Ok(game.clone())
    }

    async fn delete_game(&self, game_id: GameId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        data.check_writable("delete_game")?;

        if data.games.remove(&game_id).is_none() {
            return Err(RepositoryError::not_found_with_context(
                format!("Game {} not found", game_id),
                ErrorContext::new("delete_game")
                    .with_entity("game")
                    .with_entity_id(game_id),
            ));
        }
        data.forget_deleted_generations();
        Ok(())
    }

    async fn delete_games(&self, game_ids: &[GameId]) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        data.check_writable("delete_games")?;

        let removed = game_ids
            .iter()
            .filter(|id| data.games.remove(*id).is_some())
            .count();
        data.forget_deleted_generations();
        Ok(removed)
    }
}

#[async_trait]
impl SportRepository for LocalRepository {
    async fn create_sport(&self, sport: &NewSport) -> RepositoryResult<Sport> {
        let mut data = self.data.write();
        data.check_writable("create_sport")?;

        let name = sport.name.trim();
        if data
            .sports
            .values()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
        {
            return Err(RepositoryError::conflict(format!(
                "Sport '{}' already exists",
                name
            )));
        }

        let id = SportId(data.next_sport_id);
        data.next_sport_id += 1;
        let stored = Sport {
            id,
            name: name.to_string(),
        };
        data.sports.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_sport(&self, sport_id: SportId) -> RepositoryResult<Option<Sport>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.sports.get(&sport_id).cloned())
    }

    async fn list_sports(&self) -> RepositoryResult<Vec<Sport>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.sports.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameStatus, Gender};
    use chrono::TimeZone;

    fn new_game(home: TeamId, away: TeamId) -> NewGame {
        NewGame {
            sport_id: SportId(1),
            home_team_id: home,
            away_team_id: away,
            gender: Gender::Men,
            scheduled_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            venue: "TBD".to_string(),
            status: GameStatus::Scheduled,
        }
    }

    async fn two_teams(repo: &LocalRepository) -> (Team, Team) {
        let a = repo
            .create_team(&NewTeam::new("A", SportId(1), "competitive", Gender::Men))
            .await
            .unwrap();
        let b = repo
            .create_team(&NewTeam::new("B", SportId(1), "competitive", Gender::Men))
            .await
            .unwrap();
        (a, b)
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;
        assert_eq!(a.id, TeamId(1));
        assert_eq!(b.id, TeamId(2));
    }

    #[tokio::test]
    async fn test_bulk_insert_is_all_or_nothing() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;

        let batch = vec![new_game(a.id, b.id), new_game(b.id, TeamId(99))];
        let err = repo.bulk_insert_games(&batch, None).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(repo.game_count(), 0);

        let stored = repo
            .bulk_insert_games(&batch[..1], None)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(repo.game_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_write_failure_stores_nothing() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;
        repo.set_fail_writes(true);

        let err = repo
            .bulk_insert_games(&[new_game(a.id, b.id)], None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::TransactionError { .. }));
        assert_eq!(repo.game_count(), 0);

        // Reads still work.
        assert_eq!(repo.list_teams(&TeamFilter::default()).await.unwrap().len(), 2);
    }

    fn record(key: &str) -> GenerationRecord {
        GenerationRecord {
            key: GenerationKey(key.to_string()),
            fingerprint: "fp".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generation_keys_are_recorded_and_forgotten() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;
        let rec = record("abc");

        let stored = repo
            .bulk_insert_games(&[new_game(a.id, b.id)], Some(&rec))
            .await
            .unwrap();
        let found = repo.find_generation(&rec.key).await.unwrap().unwrap();
        assert_eq!(found.games, stored);
        assert_eq!(found.fingerprint, "fp");

        let err = repo
            .bulk_insert_games(&[new_game(b.id, a.id)], Some(&rec))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));

        repo.delete_game(stored[0].id).await.unwrap();
        assert_eq!(repo.find_generation(&rec.key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_generation_missing_one_game_is_forgotten() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;
        let rec = record("season");

        let stored = repo
            .bulk_insert_games(&[new_game(a.id, b.id), new_game(b.id, a.id)], Some(&rec))
            .await
            .unwrap();
        repo.delete_games(&[stored[1].id]).await.unwrap();

        assert_eq!(repo.find_generation(&rec.key).await.unwrap(), None);
        assert_eq!(repo.game_count(), 1);

        // The key is free again once its season is gone.
        repo.bulk_insert_games(&[new_game(b.id, a.id)], Some(&rec))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_team_with_games_cannot_be_deleted() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;
        let game = repo.create_game(&new_game(a.id, b.id)).await.unwrap();

        let err = repo.delete_team(a.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));

        repo.delete_game(game.id).await.unwrap();
        repo.delete_team(a.id).await.unwrap();
        assert!(repo.get_team(a.id).await.unwrap().is_none());
        assert!(repo.delete_team(a.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_games_sorted_by_date() {
        let repo = LocalRepository::new();
        let (a, b) = two_teams(&repo).await;
        let mut later = new_game(a.id, b.id);
        later.scheduled_at = Utc.with_ymd_and_hms(2025, 7, 8, 0, 0, 0).unwrap();
        repo.create_game(&later).await.unwrap();
        repo.create_game(&new_game(b.id, a.id)).await.unwrap();

        let games = repo.list_games(&GameFilter::default()).await.unwrap();
        assert_eq!(games[0].home_team_id, b.id);
        assert_eq!(games[1].home_team_id, a.id);
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_reads() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.list_sports().await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_sport_names_are_unique_ignoring_case() {
        let repo = LocalRepository::new();
        repo.create_sport(&NewSport {
            name: "Volleyball".to_string(),
        })
        .await
        .unwrap();
        let err = repo
            .create_sport(&NewSport {
                name: " volleyball ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
        assert_eq!(repo.list_sports().await.unwrap().len(), 1);
    }
}
