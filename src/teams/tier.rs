use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competitive tier of a conference, used to set base win points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Top,
    Mid,
    Lower,
    Unknown,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Top => "top",
            Tier::Mid => "mid",
            Tier::Lower => "lower",
            Tier::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" | "p4" | "power" => Ok(Tier::Top),
            "mid" | "g5" | "g6" => Ok(Tier::Mid),
            "lower" | "fcs" => Ok(Tier::Lower),
            "unknown" => Ok(Tier::Unknown),
            other => anyhow::bail!("Unknown tier: {}", other),
        }
    }
}
