pub mod accumulator;
pub mod points;
pub mod publish;

pub use accumulator::{apply_opponent_wins_bonus, finalize_season, fold_games, SeasonRecords};
pub use points::{points_for_win, PointBreakdown, WinContext};
pub use publish::{publish, publish_at};
