use anyhow::{Context, Result};
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetchers::Provider;
use crate::teams::Tier;

/// Points awarded for a win, before and after bonuses
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    pub top_tier_win: u32,
    pub mid_tier_win: u32,
    pub lower_tier_win: u32,
    pub away_win: u32,
    pub blowout_win: u32,
    pub shutout_win: u32,
    pub ranked_win: u32,
    pub blowout_margin: u32,
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            top_tier_win: 12,
            mid_tier_win: 6,
            lower_tier_win: 3,
            away_win: 1,
            blowout_win: 1,
            shutout_win: 1,
            ranked_win: 1,
            blowout_margin: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    pub points: PointTable,
    /// Tier used to score wins over teams missing from the conference table
    pub unknown_tier: Tier,
    /// Add the beaten opponent's season win count to each win
    pub opponent_wins_bonus: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points: PointTable::default(),
            unknown_tier: Tier::Lower,
            opponent_wins_bonus: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingSettings {
    pub top_n: usize,
    pub tie_break_ppg: bool,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            top_n: 25,
            tie_break_ppg: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSettings {
    pub year: i32,
    pub first_week: u32,
    pub last_week: u32,
}

impl SeasonSettings {
    pub fn weeks(&self) -> std::ops::RangeInclusive<u32> {
        self.first_week..=self.last_week
    }
}

impl Default for SeasonSettings {
    fn default() -> Self {
        Self {
            year: 2025,
            first_week: 1,
            last_week: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScraperSettings {
    pub provider: Provider,
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub cbs_base_url: String,
    pub espn_base_url: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            provider: Provider::Cbs,
            rate_limit_ms: 1000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36",
            timeout_secs: 30,
            max_retries: 1,
            cbs_base_url: "https://www.cbssports.com/college-football/schedule/FBS".to_string(),
            espn_base_url: "https://www.espn.com/college-football/schedule".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub rankings_path: PathBuf,
    pub conference_data_path: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            rankings_path: PathBuf::from("rankings-data.json"),
            conference_data_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Minutes between scheduled refreshes while serving. 0 disables them.
    pub refresh_minutes: u64,
}

impl ServerSettings {
    pub fn refresh_interval(&self) -> Option<Duration> {
        match self.refresh_minutes {
            0 => None,
            minutes => Some(Duration::from_secs(minutes * 60)),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { refresh_minutes: 60 }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub season: SeasonSettings,
    pub scoring: ScoringSettings,
    pub ranking: RankingSettings,
    pub scraper: ScraperSettings,
    pub output: OutputSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `CFB_*`, `RANKINGS_PATH` and `CONFERENCE_DATA_PATH`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(year) = lookup("CFB_SEASON") {
            config.season.year = year
                .parse()
                .with_context(|| format!("Invalid CFB_SEASON: {}", year))?;
        }
        if let Some(provider) = lookup("CFB_PROVIDER") {
            config.scraper.provider = provider.parse()?;
        }
        if let Some(top_n) = lookup("CFB_TOP_N") {
            config.ranking.top_n = top_n
                .parse()
                .with_context(|| format!("Invalid CFB_TOP_N: {}", top_n))?;
        }
        if let Some(flag) = lookup("CFB_OPPONENT_WINS_BONUS") {
            config.scoring.opponent_wins_bonus = parse_flag(&flag);
        }
        if let Some(tier) = lookup("CFB_UNKNOWN_TIER") {
            config.scoring.unknown_tier = tier.parse()?;
        }
        if let Some(minutes) = lookup("CFB_REFRESH_MINUTES") {
            config.server.refresh_minutes = minutes
                .parse()
                .with_context(|| format!("Invalid CFB_REFRESH_MINUTES: {}", minutes))?;
        }
        if let Some(path) = lookup("RANKINGS_PATH") {
            config.output.rankings_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("CONFERENCE_DATA_PATH") {
            config.output.conference_data_path = Some(PathBuf::from(path));
        }

        if config.scoring.unknown_tier == Tier::Unknown {
            warn!("CFB_UNKNOWN_TIER=unknown scores like lower tier");
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
