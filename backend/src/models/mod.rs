//! Domain models shared by the scheduler, repository and HTTP layers.

pub mod macros;
pub mod game;
pub mod sport;
pub mod team;
pub mod time;

crate::define_id_type!(
    /// Team identifier (database primary key).
    TeamId
);
crate::define_id_type!(
    /// Game identifier (database primary key).
    GameId
);
crate::define_id_type!(
    /// Sport identifier (database primary key).
    SportId
);

pub use game::*;
pub use sport::*;
pub use team::*;
pub use time::parse_datetime;
