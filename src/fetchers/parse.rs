use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};

pub fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector {}: {}", css, e))
}

/// Collapsed, trimmed text content of an element
pub fn element_text(element: &ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Schedule slots whose opponent is not decided yet
pub fn is_placeholder_team(name: &str) -> bool {
    matches!(name.to_uppercase().as_str(), "" | "TBD" | "TBA")
}

/// A schedule page must at least be an HTML document
pub fn ensure_html(body: &str) -> Result<()> {
    let head = body.get(..body.len().min(2048)).unwrap_or(body).to_lowercase();
    if head.contains("<!doctype html") || head.contains("<html") {
        Ok(())
    } else {
        let preview: String = body.chars().take(200).collect();
        anyhow::bail!("Response is not an HTML page: {}", preview)
    }
}

/// Text patterns shared by every schedule page parser
pub struct RowPatterns {
    rank_prefix: Regex,
    record_suffix: Regex,
    combined_score: Regex,
    kickoff_time: Regex,
}

impl RowPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rank_prefix: compile(r"^(\d+)\s+(.+)$")?,
            record_suffix: compile(r"\s*\(\d+-\d+(?:-\d+)?\)$")?,
            combined_score: compile(r"(\d+)\D+(\d+)")?,
            kickoff_time: compile(r"\b\d{1,2}:\d{2}\b")?,
        })
    }

    /// "1 Ohio State" → (Some(1), "Ohio State")
    pub fn split_rank(&self, text: &str) -> (Option<u32>, String) {
        let text = normalize_text(text);
        let (rank, name) = match self.rank_prefix.captures(&text) {
            Some(caps) => (caps[1].parse().ok(), caps[2].to_string()),
            None => (None, text.clone()),
        };
        (rank, self.record_suffix.replace(&name, "").into_owned())
    }

    /// "<int> ... <int>" in away-home order. Kickoff times are not scores.
    pub fn parse_score_cell(&self, text: &str) -> Option<(u32, u32)> {
        if self.kickoff_time.is_match(text) {
            return None;
        }
        let caps = self.combined_score.captures(text)?;
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Failed to compile pattern {}", pattern))
}
