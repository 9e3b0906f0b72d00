pub mod cbs;
pub mod espn;
pub mod parse;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::config::settings::ScraperSettings;
use crate::domain::RawGameRecord;

pub use cbs::{CbsPageParser, CbsScheduleScraper};
pub use espn::{EspnPageParser, EspnScheduleScraper};

/// Where weekly schedules come from. Only this varies per provider.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_week(&mut self, year: i32, week: u32) -> Result<Vec<RawGameRecord>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    Cbs,
    Espn,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Cbs => f.write_str("cbs"),
            Provider::Espn => f.write_str("espn"),
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cbs" => Ok(Provider::Cbs),
            "espn" => Ok(Provider::Espn),
            other => anyhow::bail!("Unknown schedule provider: {}", other),
        }
    }
}

pub fn build_source(settings: &ScraperSettings) -> Result<Box<dyn ScheduleSource>> {
    let source: Box<dyn ScheduleSource> = match settings.provider {
        Provider::Cbs => Box::new(CbsScheduleScraper::new(settings)?),
        Provider::Espn => Box::new(EspnScheduleScraper::new(settings)?),
    };
    Ok(source)
}
