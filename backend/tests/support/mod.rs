#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use intramural::db::repositories::LocalRepository;
use intramural::db::repository::{SportRepository, TeamRepository};
use intramural::models::{Gender, NewSport, NewTeam, Sport, Team};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Register a sport in `repo`.
pub async fn seed_sport(repo: &LocalRepository, name: &str) -> Sport {
    repo.create_sport(&NewSport {
        name: name.to_string(),
    })
    .await
    .expect("create sport")
}

/// Register one team per name in the same sport/division/gender.
pub async fn seed_division(
    repo: &LocalRepository,
    sport: &Sport,
    division: &str,
    gender: Gender,
    names: &[&str],
) -> Vec<Team> {
    let mut teams = Vec::with_capacity(names.len());
    for name in names {
        let team = repo
            .create_team(&NewTeam::new(*name, sport.id, division, gender))
            .await
            .expect("create team");
        teams.push(team);
    }
    teams
}
