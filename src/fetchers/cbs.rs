use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};

use super::parse::{element_text, ensure_html, is_placeholder_team, selector, RowPatterns};
use super::ScheduleSource;
use crate::config::settings::ScraperSettings;
use crate::domain::RawGameRecord;
use crate::http::RateLimitedClient;

/// CBS Sports FBS schedule pages
pub struct CbsScheduleScraper {
    client: RateLimitedClient,
    parser: CbsPageParser,
    base_url: String,
}

impl CbsScheduleScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            settings.max_retries,
        )?;

        Ok(Self {
            client,
            parser: CbsPageParser::new()?,
            base_url: settings.cbs_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, year: i32, week: u32) -> String {
        format!("{}/{}/regular/{}/", self.base_url, year, week)
    }
}

#[async_trait]
impl ScheduleSource for CbsScheduleScraper {
    fn name(&self) -> &'static str {
        "cbs"
    }

    async fn fetch_week(&mut self, year: i32, week: u32) -> Result<Vec<RawGameRecord>> {
        let url = self.build_url(year, week);
        info!("Fetching schedule for week {} from {}", week, url);

        let body = self.client.get_text(&url).await?;
        let games = self.parser.parse_week(&body, week)?;

        info!("  → Parsed {} games for week {}", games.len(), week);
        Ok(games)
    }
}

/// Rows are `away | home | score`, each team cell holding a team link
pub struct CbsPageParser {
    patterns: RowPatterns,
    row: Selector,
    cell: Selector,
    team_link: Selector,
}

impl CbsPageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: RowPatterns::new()?,
            row: selector("tr")?,
            cell: selector("td")?,
            team_link: selector(r#"a[href*="team"]"#)?,
        })
    }

    pub fn parse_week(&self, body: &str, week: u32) -> Result<Vec<RawGameRecord>> {
        ensure_html(body)?;
        let html = Html::parse_document(body);

        let games = html
            .select(&self.row)
            .filter_map(|row| self.parse_row(row, week))
            .collect();
        Ok(games)
    }

    fn parse_row(&self, row: ElementRef<'_>, week: u32) -> Option<RawGameRecord> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell).collect();
        if cells.len() < 3 {
            return None;
        }

        let Some((away_rank, away_team)) = self.team_in(&cells[0]) else {
            debug!("Skipping row without away team link");
            return None;
        };
        let Some((home_rank, home_team)) = self.team_in(&cells[1]) else {
            debug!("Skipping row without home team link");
            return None;
        };

        let mut game = RawGameRecord::scheduled(week, &away_team, &home_team)
            .with_ranks(away_rank, home_rank);
        if let Some((away_score, home_score)) = self.patterns.parse_score_cell(&element_text(&cells[2])) {
            game = game.with_score(away_score, home_score);
        }

        debug!(
            "Parsed game: {} {} @ {} {}",
            game.away_team,
            game.away_score.map(|s| s.to_string()).unwrap_or_default(),
            game.home_team,
            game.home_score.map(|s| s.to_string()).unwrap_or_default()
        );
        Some(game)
    }

    /// Logo links come first and carry no text, so the name is the last non-empty link
    fn team_in(&self, cell: &ElementRef<'_>) -> Option<(Option<u32>, String)> {
        let text = cell
            .select(&self.team_link)
            .map(|link| element_text(&link))
            .filter(|text| !text.is_empty())
            .last()?;
        let (rank, name) = self.patterns.split_rank(&text);
        if is_placeholder_team(&name) {
            return None;
        }
        Some((rank, name))
    }
}
