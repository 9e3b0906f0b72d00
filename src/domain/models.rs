use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::teams::Tier;

/// One matchup as scraped from a week's schedule page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameRecord {
    pub week: u32,
    pub away_team: String,
    pub home_team: String,
    pub away_rank: Option<u32>,
    pub home_rank: Option<u32>,
    pub away_score: Option<u32>,
    pub home_score: Option<u32>,
}

impl RawGameRecord {
    pub fn scheduled(week: u32, away_team: &str, home_team: &str) -> Self {
        Self {
            week,
            away_team: away_team.to_string(),
            home_team: home_team.to_string(),
            away_rank: None,
            home_rank: None,
            away_score: None,
            home_score: None,
        }
    }

    pub fn with_ranks(mut self, away_rank: Option<u32>, home_rank: Option<u32>) -> Self {
        self.away_rank = away_rank;
        self.home_rank = home_rank;
        self
    }

    pub fn with_score(mut self, away_score: u32, home_score: u32) -> Self {
        self.away_score = Some(away_score);
        self.home_score = Some(home_score);
        self
    }

    pub fn is_played(&self) -> bool {
        self.away_score.is_some() && self.home_score.is_some()
    }

    /// Winner/loser view of a played game. A level final has neither.
    pub fn outcome(&self) -> Option<GameOutcome> {
        let (away, home) = (self.away_score?, self.home_score?);
        if away == home {
            return None;
        }

        let away_won = away > home;
        let outcome = if away_won {
            GameOutcome {
                winner_score: away,
                loser_score: home,
                winner_was_away: true,
                loser_rank: self.home_rank,
            }
        } else {
            GameOutcome {
                winner_score: home,
                loser_score: away,
                winner_was_away: false,
                loser_rank: self.away_rank,
            }
        };
        Some(outcome)
    }
}

/// Winner/loser view of a decided game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner_score: u32,
    pub loser_score: u32,
    pub winner_was_away: bool,
    pub loser_rank: Option<u32>,
}

impl GameOutcome {
    pub fn score_diff(&self) -> u32 {
        self.winner_score - self.loser_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

/// One decided game from a team's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub week: u32,
    pub opponent: String,
    pub is_away: bool,
    pub result: GameResult,
    pub score: String,
    pub score_diff: i64,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityWin {
    pub week: u32,
    pub opponent: String,
    pub rank: u32,
    pub score: String,
    pub points: u32,
}

/// Season-to-date state for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonRecord {
    pub name: String,
    pub conference: String,
    pub tier: Tier,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub away_wins: u32,
    pub blowout_wins: u32,
    pub shutout_wins: u32,
    pub schedule: Vec<ScheduleEntry>,
    pub quality_wins: Vec<QualityWin>,
}

impl TeamSeasonRecord {
    pub fn new(name: &str, conference: &str, tier: Tier) -> Self {
        Self {
            name: name.to_string(),
            conference: conference.to_string(),
            tier,
            wins: 0,
            losses: 0,
            points: 0,
            away_wins: 0,
            blowout_wins: 0,
            shutout_wins: 0,
            schedule: Vec::new(),
            quality_wins: Vec::new(),
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn points_per_game(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            games => f64::from(self.points) / f64::from(games),
        }
    }

    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }
}

/// Published entry: a season record with its position in the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTeam {
    pub rank: usize,
    #[serde(flatten)]
    pub record: TeamSeasonRecord,
    pub points_per_game: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    pub teams: Vec<RankedTeam>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl RankingSnapshot {
    /// What is served before the first ranking run has completed
    pub fn empty() -> Self {
        Self {
            teams: Vec::new(),
            last_updated: None,
        }
    }
}
