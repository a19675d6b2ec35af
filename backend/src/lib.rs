//! # Intramural Backend
//!
//! League management backend for university intramural sports.
//!
//! The core is the season scheduler: a round-robin pairing generator, a
//! week-bucketing assembler, and the compatibility rules every game must
//! satisfy (same division, gender category and sport). Around it sit a
//! repository abstraction with an in-memory store and an axum REST API.
//!
//! ## Architecture
//!
//! - [`scheduler`]: pure pairing, dating and compatibility logic
//! - [`models`]: teams, games, sports and their ids
//! - [`db`]: repository traits, the local repository, and CRUD services
//! - [`services`]: schedule generation, game validation, standings
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod scheduler;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
