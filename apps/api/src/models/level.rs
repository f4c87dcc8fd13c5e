use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Candidate seniority. Drives starting complexity, the communication bank
/// level tag and the experience code fed to the complexity model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ExperienceLevel {
    #[default]
    Intern,
    Associate,
    SoftwareEngineer,
}

/// Difficulty tag used by the communication bank and the keyword indicator lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTag {
    Basic,
    Medium,
    Hard,
}

impl ExperienceLevel {
    /// Complexity of the first technical question for a fresh session.
    pub fn starting_complexity(self) -> f64 {
        match self {
            Self::Intern => 2.0,
            Self::Associate => 2.7,
            Self::SoftwareEngineer => 3.2,
        }
    }

    /// Integer encoding the complexity model was trained with.
    pub fn code(self) -> u8 {
        match self {
            Self::Intern => 0,
            Self::Associate => 1,
            Self::SoftwareEngineer => 2,
        }
    }

    pub fn tag(self) -> LevelTag {
        match self {
            Self::Intern => LevelTag::Basic,
            Self::Associate => LevelTag::Medium,
            Self::SoftwareEngineer => LevelTag::Hard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intern => "intern",
            Self::Associate => "associate",
            Self::SoftwareEngineer => "software_engineer",
        }
    }

    /// Parses an optional request field; absent or blank means `Intern`.
    pub fn parse_or_default(raw: Option<&str>) -> Result<Self, UnknownLevel> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown experience level '{0}' (expected intern, associate or software engineer)")]
pub struct UnknownLevel(pub String);

impl FromStr for ExperienceLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "intern" => Ok(Self::Intern),
            "associate" => Ok(Self::Associate),
            "software_engineer" => Ok(Self::SoftwareEngineer),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExperienceLevel {
    type Error = UnknownLevel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl LevelTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for LevelTag {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}
