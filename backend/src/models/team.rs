//! Team records and the gender categories teams compete in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{SportId, TeamId};

/// Gender category a team is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "men")]
    Men,
    #[serde(rename = "women")]
    Women,
    #[serde(rename = "co-ed", alias = "coed")]
    CoEd,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::CoEd => "co-ed",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            "co-ed" | "coed" => Ok(Gender::CoEd),
            other => Err(format!("Unknown gender category: {}", other)),
        }
    }
}

/// A registered team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub sport_id: SportId,
    /// Competitive tier, e.g. "recreational" or "competitive".
    pub division: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Team data before the repository assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub sport_id: SportId,
    pub division: String,
    pub gender: Gender,
    #[serde(default)]
    pub captain: Option<String>,
}

impl NewTeam {
    pub fn new(
        name: impl Into<String>,
        sport_id: SportId,
        division: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            name: name.into(),
            sport_id,
            division: division.into(),
            gender,
            captain: None,
        }
    }

    pub fn with_captain(mut self, captain: impl Into<String>) -> Self {
        self.captain = Some(captain.into());
        self
    }
}

/// Optional filters for listing teams. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamFilter {
    #[serde(default)]
    pub sport_id: Option<SportId>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl TeamFilter {
    pub fn matches(&self, team: &Team) -> bool {
        self.sport_id.map_or(true, |id| team.sport_id == id)
            && self
                .division
                .as_deref()
                .map_or(true, |d| team.division == d)
            && self.gender.map_or(true, |g| team.gender == g)
    }
}
