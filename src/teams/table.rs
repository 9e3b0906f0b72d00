use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::tier::Tier;
use crate::errors::parse_context;

const EMBEDDED_TABLE: &str = include_str!("../../data/conferences.json");

/// Conference affiliation data, as stored in `data/conferences.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceTable {
    pub season: i32,
    pub conferences: HashMap<String, Tier>,
    pub teams: HashMap<String, String>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    pub lower_tier_label: String,
    #[serde(default)]
    pub lower_tier_programs: Vec<String>,
}

impl ConferenceTable {
    /// Table compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_TABLE).context(parse_context("embedded conference table"))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read conference table {}", path.display()))?;
        let table = Self::from_json(&json)
            .with_context(|| parse_context(&format!("conference table {}", path.display())))?;
        info!("Loaded conference table from {}", path.display());
        Ok(table)
    }

    /// External file when a path is given, embedded table otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        for (team, conference) in &self.teams {
            if !self.conferences.contains_key(conference) {
                anyhow::bail!("Team {} is in unmapped conference {}", team, conference);
            }
        }

        for (alias, target) in &self.aliases {
            let known = self.teams.contains_key(target)
                || self.lower_tier_programs.iter().any(|p| p == target);
            if !known {
                anyhow::bail!("Alias {} points at unknown team {}", alias, target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_is_valid() {
        let table = ConferenceTable::embedded().unwrap();
        assert_eq!(table.conferences.get("SEC"), Some(&Tier::Top));
        assert_eq!(table.conferences.get("Mountain West"), Some(&Tier::Mid));
        assert_eq!(table.teams.get("Washington State").map(String::as_str), Some("Pac-12"));
        assert!(table.lower_tier_programs.iter().any(|p| p == "North Dakota State"));
    }

    #[test]
    fn test_rejects_alias_to_missing_team() {
        let json = r#"{
            "season": 2025,
            "conferences": { "SEC": "top" },
            "teams": { "Alabama": "SEC" },
            "aliases": { "Bama": "Alabama", "Roll Tide": "Crimson Tide" },
            "lowerTierLabel": "FCS"
        }"#;

        let err = ConferenceTable::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Roll Tide"));
    }

    #[test]
    fn test_rejects_team_in_unmapped_conference() {
        let json = r#"{
            "season": 2025,
            "conferences": { "SEC": "top" },
            "teams": { "Boise State": "Mountain West" },
            "lowerTierLabel": "FCS"
        }"#;

        assert!(ConferenceTable::from_json(json).is_err());
    }
}
