use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender as encoded in the candidate export (`5` = male, `1` = female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub const MALE_CODE: i64 = 5;
    pub const FEMALE_CODE: i64 = 1;

    pub const fn from_code(code: i64) -> Self {
        match code {
            Self::MALE_CODE => Self::Male,
            Self::FEMALE_CODE => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Parses the raw cell. Spreadsheet exports sometimes write codes as `5.0`.
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 => Self::from_code(value as i64),
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Unknown",
        }
    }
}

/// Gender selector offered by the filter controls.
///
/// JSON and command-line input share the `FromStr` parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
}

impl GenderFilter {
    pub const fn ordered() -> [Self; 3] {
        [Self::All, Self::Male, Self::Female]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub(crate) fn accepts(self, gender: Option<Gender>) -> bool {
        match self {
            Self::All => true,
            Self::Male => gender == Some(Gender::Male),
            Self::Female => gender == Some(Gender::Female),
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!(
                "unknown gender '{other}' (expected All, Male or Female)"
            )),
        }
    }
}

impl TryFrom<String> for GenderFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One candidate row as loaded from the export. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub experience: Option<String>,
    pub contact: Option<String>,
    pub gender: Option<Gender>,
    pub religion: Option<String>,
    pub resume_url: Option<String>,
}

impl CandidateRecord {
    /// Comma-separated sub-areas, trimmed, blanks dropped.
    pub fn area_fragments(&self) -> impl Iterator<Item = &str> {
        self.area
            .as_deref()
            .into_iter()
            .flat_map(|area| area.split(','))
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
    }
}
