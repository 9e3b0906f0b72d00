pub mod models;
pub mod progress;
pub mod season;

pub use models::{
    GameOutcome, GameResult, QualityWin, RankedTeam, RankingSnapshot, RawGameRecord,
    ScheduleEntry, TeamSeasonRecord,
};
pub use progress::SeasonProgress;
pub use season::{SeasonFetch, WeekOutcome};
