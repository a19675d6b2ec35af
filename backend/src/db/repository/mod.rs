//! Repository trait definitions for the persistence collaborator.
//!
//! Responsibilities are split across focused traits:
//!
//! - [`error`]: Error types for repository operations
//! - [`team`]: Team records and division lookups
//! - [`game`]: Game records, including the atomic bulk insert used by
//!   schedule generation
//! - [`sport`]: Sport catalogue
//!
//! Services take a [`FullRepository`], which every type implementing all
//! three traits gets for free.

pub mod error;
pub mod game;
pub mod sport;
pub mod team;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use game::{GameRepository, GenerationKey, GenerationRecord, StoredGeneration};
pub use sport::SportRepository;
pub use team::TeamRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: TeamRepository + GameRepository + SportRepository {}

// Blanket implementation: any type implementing all three traits is a FullRepository
impl<T> FullRepository for T where T: TeamRepository + GameRepository + SportRepository {}
