use anyhow::Result;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::table::ConferenceTable;
use super::tier::Tier;

pub const UNKNOWN_CONFERENCE: &str = "Unknown";

/// Conference and tier resolved for one team name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub name: String,
    pub conference: String,
    pub tier: Tier,
}

impl Classification {
    pub fn is_known(&self) -> bool {
        self.tier != Tier::Unknown
    }
}

/// Immutable name → conference → tier lookup
#[derive(Debug, Clone)]
pub struct TeamClassifier {
    conferences: HashMap<String, Tier>,
    teams: HashMap<String, String>,
    aliases: HashMap<String, String>,
    lower_tier_programs: HashSet<String>,
    lower_tier_label: String,
    folded: HashMap<String, String>,
}

impl TeamClassifier {
    pub fn new(table: ConferenceTable) -> Self {
        let folded = Self::build_folded_index(&table);

        Self {
            conferences: table.conferences,
            teams: table.teams,
            aliases: table.aliases,
            lower_tier_programs: table.lower_tier_programs.into_iter().collect(),
            lower_tier_label: table.lower_tier_label,
            folded,
        }
    }

    pub fn embedded() -> Result<Self> {
        Ok(Self::new(ConferenceTable::embedded()?))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let classifier = Self::new(ConferenceTable::load(path)?);
        info!("Classifier ready with {} teams", classifier.team_count());
        Ok(classifier)
    }

    /// Resolve a scraped name to its canonical spelling, if the table knows it
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        let name = normalize_whitespace(name);
        self.exact_canonical(&name)
            .or_else(|| self.folded.get(&fold_key(&name)).map(String::as_str))
    }

    pub fn classify(&self, name: &str) -> Classification {
        let Some(canonical) = self.canonical_name(name) else {
            warn!("Unknown conference for team {}", name.trim());
            return Classification {
                name: normalize_whitespace(name),
                conference: UNKNOWN_CONFERENCE.to_string(),
                tier: Tier::Unknown,
            };
        };

        if self.lower_tier_programs.contains(canonical) {
            return Classification {
                name: canonical.to_string(),
                conference: self.lower_tier_label.clone(),
                tier: Tier::Lower,
            };
        }

        let conference = self
            .teams
            .get(canonical)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CONFERENCE);

        Classification {
            name: canonical.to_string(),
            conference: conference.to_string(),
            tier: self.tier_of(conference),
        }
    }

    pub fn tier_of(&self, conference: &str) -> Tier {
        if conference == self.lower_tier_label {
            return Tier::Lower;
        }
        self.conferences.get(conference).copied().unwrap_or(Tier::Unknown)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len() + self.lower_tier_programs.len()
    }

    fn exact_canonical(&self, name: &str) -> Option<&str> {
        if let Some((canonical, _)) = self.teams.get_key_value(name) {
            return Some(canonical);
        }
        if let Some(canonical) = self.lower_tier_programs.get(name) {
            return Some(canonical);
        }
        self.aliases.get(name).map(String::as_str)
    }

    fn build_folded_index(table: &ConferenceTable) -> HashMap<String, String> {
        let mut folded = HashMap::new();

        for name in table.teams.keys().chain(table.lower_tier_programs.iter()) {
            folded.insert(fold_key(name), name.clone());
        }
        for (alias, canonical) in &table.aliases {
            folded.entry(fold_key(alias)).or_insert_with(|| canonical.clone());
        }

        folded
    }
}

fn normalize_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case and whitespace insensitive lookup key for a team name
pub fn fold_key(name: &str) -> String {
    normalize_whitespace(name).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TeamClassifier {
        TeamClassifier::embedded().unwrap()
    }

    #[test]
    fn test_power_conference_team() {
        let class = classifier().classify("Ohio State");
        assert_eq!(class.conference, "Big Ten");
        assert_eq!(class.tier, Tier::Top);
    }

    #[test]
    fn test_abbreviation_resolves_like_canonical_name() {
        let classifier = classifier();
        let short = classifier.classify("Washington St.");
        let full = classifier.classify("Washington State");

        assert_eq!(short, full);
        assert_eq!(short.name, "Washington State");
        assert_eq!(short.tier, Tier::Mid);
    }

    #[test]
    fn test_provider_codes_and_case_folding() {
        let classifier = classifier();
        assert_eq!(classifier.classify("MSST").name, "Mississippi State");
        assert_eq!(classifier.classify("usf").name, "South Florida");
        assert_eq!(classifier.classify("  boise   st. ").name, "Boise State");
    }

    #[test]
    fn test_lower_tier_program_bypasses_conference_lookup() {
        let class = classifier().classify("NDSU");
        assert_eq!(class.name, "North Dakota State");
        assert_eq!(class.conference, "FCS");
        assert_eq!(class.tier, Tier::Lower);
    }

    #[test]
    fn test_unknown_name_gets_default_classification() {
        let classifier = classifier();
        let first = classifier.classify("Hogwarts Tech");
        let second = classifier.classify("Hogwarts Tech");

        assert_eq!(first, second);
        assert_eq!(first.conference, UNKNOWN_CONFERENCE);
        assert_eq!(first.tier, Tier::Unknown);
        assert!(!first.is_known());
        assert!(classifier.canonical_name("").is_none());
    }

    #[test]
    fn test_fold_key_ignores_case_and_spacing() {
        assert_eq!(fold_key(" Nowhere   TECH "), fold_key("nowhere tech"));
    }

    #[test]
    fn test_team_count_covers_lower_tier_programs() {
        let table = ConferenceTable::embedded().unwrap();
        let expected = table.teams.len() + table.lower_tier_programs.len();

        assert_eq!(TeamClassifier::new(table).team_count(), expected);
    }

    #[test]
    fn test_tier_of_labels() {
        let classifier = classifier();
        assert_eq!(classifier.tier_of("SEC"), Tier::Top);
        assert_eq!(classifier.tier_of("Independent"), Tier::Mid);
        assert_eq!(classifier.tier_of("FCS"), Tier::Lower);
        assert_eq!(classifier.tier_of("Ivy Plus"), Tier::Unknown);
    }
}
