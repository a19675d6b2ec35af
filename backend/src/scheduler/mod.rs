//! Season scheduling core.
//!
//! - [`round_robin`]: pairs every team with every other team exactly once
//! - [`assembler`]: assigns week-bucketed dates and builds game records
//! - [`compatibility`]: division/gender/sport rules for any two teams
//!
//! Everything here is pure and synchronous; persistence and locking live in
//! [`crate::services`].

pub mod assembler;
pub mod compatibility;
pub mod round_robin;

pub use assembler::{assemble_schedule, bucket_date, SchedulePlan};
pub use compatibility::{check_compatibility, check_pair, CompatibilityError};
pub use round_robin::{generate_round_robin, generate_rounds, matchup_count, Matchup, Round};
