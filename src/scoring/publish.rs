use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::accumulator::SeasonRecords;
use crate::config::settings::RankingSettings;
use crate::domain::{RankedTeam, RankingSnapshot, TeamSeasonRecord};

pub fn publish(records: &SeasonRecords, settings: &RankingSettings) -> RankingSnapshot {
    publish_at(records, settings, Utc::now())
}

/// Sort, truncate and stamp the season records
pub fn publish_at(
    records: &SeasonRecords,
    settings: &RankingSettings,
    now: DateTime<Utc>,
) -> RankingSnapshot {
    let mut ordered: Vec<&TeamSeasonRecord> = records.values().collect();
    ordered.sort_by(|a, b| compare(a, b, settings.tie_break_ppg));

    let teams = ordered
        .into_iter()
        .take(settings.top_n)
        .enumerate()
        .map(|(idx, record)| RankedTeam {
            rank: idx + 1,
            points_per_game: record.points_per_game(),
            record: record.clone(),
        })
        .collect();

    RankingSnapshot {
        teams,
        last_updated: Some(now),
    }
}

fn compare(a: &TeamSeasonRecord, b: &TeamSeasonRecord, tie_break_ppg: bool) -> Ordering {
    let by_points = b.points.cmp(&a.points);
    let by_ppg = if tie_break_ppg {
        b.points_per_game().total_cmp(&a.points_per_game())
    } else {
        Ordering::Equal
    };

    by_points.then(by_ppg).then_with(|| a.name.cmp(&b.name))
}
