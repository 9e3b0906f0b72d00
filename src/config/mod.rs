pub mod settings;

pub use settings::{
    AppConfig, OutputSettings, PointTable, RankingSettings, ScoringSettings, ScraperSettings,
    SeasonSettings, ServerSettings,
};
