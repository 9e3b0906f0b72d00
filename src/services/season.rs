use log::{info, warn};
use std::ops::RangeInclusive;

use crate::domain::{SeasonFetch, SeasonProgress, WeekOutcome};
use crate::fetchers::ScheduleSource;

/// Fetches a season one week at a time. A failed week is recorded and skipped.
pub struct SeasonCollector {
    year: i32,
    weeks: RangeInclusive<u32>,
}

impl SeasonCollector {
    pub fn new(year: i32, weeks: RangeInclusive<u32>) -> Self {
        Self { year, weeks }
    }

    pub async fn collect(&self, source: &mut dyn ScheduleSource) -> SeasonFetch {
        info!(
            "Step 1: Fetching {} season weeks {}-{} from {}...",
            self.year,
            self.weeks.start(),
            self.weeks.end(),
            source.name()
        );

        let mut progress = SeasonProgress::new(self.weeks.clone().count());
        let mut season = SeasonFetch::new();

        for week in self.weeks.clone() {
            let outcome = match source.fetch_week(self.year, week).await {
                Ok(games) => {
                    progress.record_fetched(games.len());
                    WeekOutcome::Fetched { week, games }
                }
                Err(e) => {
                    warn!("Week {} failed, continuing without it: {:#}", week, e);
                    progress.record_failed();
                    WeekOutcome::Failed {
                        week,
                        reason: format!("{:#}", e),
                    }
                }
            };
            season.push(outcome);
        }

        season
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawGameRecord;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FlakySource {
        failing_week: u32,
        calls: Vec<u32>,
    }

    #[async_trait]
    impl ScheduleSource for FlakySource {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn fetch_week(&mut self, _year: i32, week: u32) -> Result<Vec<RawGameRecord>> {
            self.calls.push(week);
            if week == self.failing_week {
                anyhow::bail!("operation timed out");
            }
            Ok(vec![RawGameRecord::scheduled(week, "Navy", "Air Force").with_score(week, 0)])
        }
    }

    #[tokio::test]
    async fn test_failed_week_is_recorded_and_skipped() {
        let mut source = FlakySource {
            failing_week: 2,
            calls: Vec::new(),
        };

        let season = SeasonCollector::new(2025, 1..=4).collect(&mut source).await;

        assert_eq!(source.calls, vec![1, 2, 3, 4]);
        assert_eq!(season.len(), 4);
        assert_eq!(season.failed_weeks(), vec![2]);
        assert_eq!(season.game_count(), 3);
        match &season.outcomes()[1] {
            WeekOutcome::Failed { reason, .. } => assert!(reason.contains("timed out")),
            other => panic!("expected failed week, got {:?}", other),
        }
    }
}
