pub mod analyzer;
pub mod fundamentals;
pub mod technical;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::PersonaError;
use crate::prompt::PromptProfile;

pub use analyzer::{analyze_all, PersonaAnalyzer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaKind {
    Fundamentals,
    Technical,
}

impl PersonaKind {
    pub fn all() -> [PersonaKind; 2] {
        [PersonaKind::Fundamentals, PersonaKind::Technical]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaKind::Fundamentals => "fundamentals",
            PersonaKind::Technical => "technical",
        }
    }
}

impl fmt::Display for PersonaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaKind {
    type Err = PersonaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fundamentals" | "fundamental" | "value" => Ok(PersonaKind::Fundamentals),
            "technical" | "tech" => Ok(PersonaKind::Technical),
            _ => Err(PersonaError::Unknown { name: s.to_string() }),
        }
    }
}

/// Fixed description of a trading persona: its system instructions and the
/// prompt sections it emphasizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Persona {
    pub kind: PersonaKind,
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub profile: PromptProfile,
}

impl Persona {
    pub fn fundamentals() -> Self {
        fundamentals::persona()
    }

    pub fn technical() -> Self {
        technical::persona()
    }

    pub fn of(kind: PersonaKind) -> Self {
        match kind {
            PersonaKind::Fundamentals => Self::fundamentals(),
            PersonaKind::Technical => Self::technical(),
        }
    }
}
