use serde::{Deserialize, Serialize};

use super::SportId;

/// A sport offered by the intramural program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub id: SportId,
    pub name: String,
}

/// Sport data before the repository assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSport {
    pub name: String,
}
