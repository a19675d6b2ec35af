//! Service layer for league business logic.
//!
//! Services sit between the HTTP handlers and the repositories. They run the
//! scheduling core and the compatibility rules, and own the per-division
//! locking around schedule generation.

pub mod games;
pub mod locks;
pub mod schedule;
pub mod standings;

pub use games::{create_game, update_game, CreateGameRequest, GameError};
pub use locks::{DivisionGuard, DivisionLocks};
pub use schedule::{
    clear_schedule, generate_schedule, GenerateScheduleRequest, GeneratedSchedule, ScheduleError,
};
pub use standings::{compute_standings, division_standings, Standing};
