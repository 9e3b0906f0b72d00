use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::parse::{element_text, ensure_html, is_placeholder_team, normalize_text, selector, RowPatterns};
use super::ScheduleSource;
use crate::config::settings::ScraperSettings;
use crate::domain::RawGameRecord;
use crate::http::RateLimitedClient;

/// ESPN regular-season schedule pages
pub struct EspnScheduleScraper {
    client: RateLimitedClient,
    parser: EspnPageParser,
    base_url: String,
}

impl EspnScheduleScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            settings.max_retries,
        )?;

        Ok(Self {
            client,
            parser: EspnPageParser::new()?,
            base_url: settings.espn_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, year: i32, week: u32) -> String {
        format!("{}/_/week/{}/year/{}/seasontype/2", self.base_url, week, year)
    }
}

#[async_trait]
impl ScheduleSource for EspnScheduleScraper {
    fn name(&self) -> &'static str {
        "espn"
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

/// Rows are `away | @ home | result`. Results list the winner first,
/// e.g. "UGA 34, CLEM 3".
pub struct EspnPageParser {
    patterns: RowPatterns,
    winner_first: Regex,
    row: Selector,
    cell: Selector,
    team_link: Selector,
}

impl EspnPageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: RowPatterns::new()?,
            winner_first: Regex::new(r"([A-Za-z&.'-]+)\s+(\d+)\s*,\s*([A-Za-z&.'-]+)\s+(\d+)")?,
            row: selector("tr")?,
            cell: selector("td")?,
            team_link: selector(r#"a[href*="/team/"]"#)?,
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

        let (away_rank, away_team) = self.team_in(&cells[0])?;
        let Some((home_rank, home_team)) = self.team_in(&cells[1]) else {
            debug!("Skipping row without home team: {}", away_team);
            return None;
        };

        let mut game = RawGameRecord::scheduled(week, &away_team, &home_team)
            .with_ranks(away_rank, home_rank);
        if let Some((away_score, home_score)) = self.scores(&element_text(&cells[2]), &away_team, &home_team) {
            game = game.with_score(away_score, home_score);
        }

        debug!("Parsed game: {:?}", game);
        Some(game)
    }

    fn team_in(&self, cell: &ElementRef<'_>) -> Option<(Option<u32>, String)> {
        let text = element_text(cell);
        let (rank, text_name) = self.patterns.split_rank(text.trim_start_matches('@').trim());

        let link_name = cell
            .select(&self.team_link)
            .map(|link| element_text(&link))
            .filter(|name| !name.is_empty())
            .last();

        let name = match link_name {
            Some(name) => self.patterns.split_rank(&name).1,
            None => text_name,
        };
        let name = normalize_text(&name);
        if is_placeholder_team(&name) {
            return None;
        }
        Some((rank, name))
    }

    /// Scores in away-home order
    fn scores(&self, result: &str, away_team: &str, home_team: &str) -> Option<(u32, u32)> {
        let Some(caps) = self.winner_first.captures(result) else {
            return self.patterns.parse_score_cell(result);
        };

        let first_abbr = &caps[1];
        let first_score: u32 = caps[2].parse().ok()?;
        let second_abbr = &caps[3];
        let second_score: u32 = caps[4].parse().ok()?;

        if first_belongs_to_home(first_abbr, second_abbr, away_team, home_team) {
            Some((second_score, first_score))
        } else {
            Some((first_score, second_score))
        }
    }
}

fn first_belongs_to_home(first: &str, second: &str, away_team: &str, home_team: &str) -> bool {
    let first_away = abbreviates(first, away_team);
    let first_home = abbreviates(first, home_team);
    if first_home != first_away {
        return first_home;
    }

    let second_away = abbreviates(second, away_team);
    let second_home = abbreviates(second, home_team);
    second_away && !second_home
}

/// Abbreviation letters appear in order in the name, starting at its initial
fn abbreviates(abbr: &str, name: &str) -> bool {
    let abbr: Vec<char> = abbr.chars().filter(|c| c.is_ascii_alphabetic()).map(|c| c.to_ascii_uppercase()).collect();
    let name: Vec<char> = name.chars().filter(|c| c.is_ascii_alphabetic()).map(|c| c.to_ascii_uppercase()).collect();

    match (abbr.first(), name.first()) {
        (Some(a), Some(n)) if a == n => {}
        _ => return false,
    }

    let mut letters = name.iter();
    abbr.iter().all(|a| letters.any(|n| n == a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK_PAGE: &str = r#"
        <!DOCTYPE html>
        <html>
            <body>
                <div class="Table__Title">Saturday, August 30, 2025</div>
                <table>
                    <thead><tr><th>matchup</th><th></th><th>result</th></tr></thead>
                    <tbody>
                        <tr>
                            <td><a href="/college-football/team/_/id/61/georgia-bulldogs"></a>
                                <span>5</span> <a href="/college-football/team/_/id/61/georgia-bulldogs">Georgia</a></td>
                            <td>@ <a href="/college-football/team/_/id/228/clemson-tigers">Clemson</a></td>
                            <td><a href="/college-football/game/_/gameId/1">UGA 34, CLEM 3</a></td>
                        </tr>
                        <tr>
                            <td><a href="/college-football/team/_/id/2655/tulane-green-wave">Tulane</a></td>
                            <td>@ <span>14</span> <a href="/college-football/team/_/id/344/mississippi-state-bulldogs">MSST</a></td>
                            <td><a href="/college-football/game/_/gameId/2">MSST 30, TULN 23</a></td>
                        </tr>
                        <tr>
                            <td><a href="/college-football/team/_/id/2/auburn-tigers">Auburn</a></td>
                            <td>@ <a href="/college-football/team/_/id/99/lsu-tigers">LSU</a></td>
                            <td>7:30 PM</td>
                        </tr>
                        <tr>
                            <td>TBD</td>
                            <td>@ TBD</td>
                            <td>Canceled</td>
                        </tr>
                        <tr><td colspan="3">Skip to main content</td></tr>
                    </tbody>
                </table>
            </body>
        </html>
    "#;

    #[test]
    fn test_parse_week_extracts_matchups() {
        let parser = EspnPageParser::new().unwrap();
        let games = parser.parse_week(WEEK_PAGE, 1).unwrap();

        assert_eq!(games.len(), 3);
        assert_eq!(
            games[0],
            RawGameRecord::scheduled(1, "Georgia", "Clemson")
                .with_ranks(Some(5), None)
                .with_score(34, 3)
        );
        assert_eq!(
            games[1],
            RawGameRecord::scheduled(1, "Tulane", "MSST")
                .with_ranks(None, Some(14))
                .with_score(23, 30)
        );
        assert_eq!(games[2], RawGameRecord::scheduled(1, "Auburn", "LSU"));
    }

    #[test]
    fn test_abbreviation_matching() {
        assert!(abbreviates("CLEM", "Clemson"));
        assert!(abbreviates("MSST", "Mississippi State"));
        assert!(abbreviates("TULN", "Tulane"));
        assert!(!abbreviates("UGA", "Georgia"));
        assert!(!abbreviates("CLEM", "Georgia"));
    }

    #[test]
    fn test_unmatched_abbreviations_assume_away_first() {
        let parser = EspnPageParser::new().unwrap();
        assert_eq!(parser.scores("XX 21, YY 20", "Navy", "Army"), Some((21, 20)));
        assert_eq!(parser.scores("24-21", "Navy", "Army"), Some((24, 21)));
        assert_eq!(parser.scores("Postponed", "Navy", "Army"), None);
    }

    #[test]
    fn test_url_layout() {
        let scraper = EspnScheduleScraper::new(&ScraperSettings::default()).unwrap();
        assert_eq!(
            scraper.build_url(2025, 3),
            "https://www.espn.com/college-football/schedule/_/week/3/year/2025/seasontype/2"
        );
    }
}
