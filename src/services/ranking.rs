use anyhow::Result;
use log::{info, warn};

use super::season::SeasonCollector;
use crate::config::settings::AppConfig;
use crate::domain::{RankingSnapshot, SeasonFetch};
use crate::fetchers::{build_source, ScheduleSource};
use crate::scoring::{self, SeasonRecords};
use crate::store::SnapshotStore;
use crate::teams::TeamClassifier;

/// Runs the whole pipeline: fetch season, fold, publish, store
pub struct RankingService {
    config: AppConfig,
    source: Box<dyn ScheduleSource>,
    classifier: TeamClassifier,
    store: SnapshotStore,
}

impl RankingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let source = build_source(&config.scraper)?;
        let classifier = TeamClassifier::load(config.output.conference_data_path.as_deref())?;
        Ok(Self::with_parts(config, source, classifier))
    }

    pub fn with_parts(config: AppConfig, source: Box<dyn ScheduleSource>, classifier: TeamClassifier) -> Self {
        let store = SnapshotStore::new(&config.output.rankings_path);
        Self {
            config,
            source,
            classifier,
            store,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Last published snapshot
    pub fn latest(&self) -> Result<RankingSnapshot> {
        self.store.load_or_empty()
    }

    /// Recompute the ranking from scratch and publish it
    pub async fn refresh(&mut self) -> Result<RankingSnapshot> {
        info!("=== Starting Ranking Update ===\n");

        let collector = SeasonCollector::new(self.config.season.year, self.config.season.weeks());
        let season = collector.collect(self.source.as_mut()).await;
        info!("  → Collected {} games from {} weeks\n", season.game_count(), season.len());

        if season.all_failed() {
            anyhow::bail!(
                "Every requested week failed to fetch; keeping the existing snapshot at {}",
                self.store.path().display()
            );
        }
        let failed = season.failed_weeks();
        if !failed.is_empty() {
            warn!("  Ranking without weeks {:?}", failed);
        }

        let snapshot = self.rank(&season);
        info!("  → Ranked {} teams\n", snapshot.teams.len());

        info!("Step 3: Saving rankings...");
        self.store.save(&snapshot)?;

        info!("=== Ranking Update Complete ===");
        Ok(snapshot)
    }

    /// Score a fetched season without touching the network or the store
    pub fn rank(&self, season: &SeasonFetch) -> RankingSnapshot {
        info!("Step 2: Calculating team points...");
        let games = season.games();
        let records = scoring::fold_games(SeasonRecords::new(), &games, &self.classifier, &self.config.scoring);
        let records = scoring::finalize_season(records, &self.config.scoring);
        scoring::publish(&records, &self.config.ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawGameRecord;
    use async_trait::async_trait;

    struct DeadSource;

    #[async_trait]
    impl ScheduleSource for DeadSource {
        fn name(&self) -> &'static str {
            "dead"
        }

        async fn fetch_week(&mut self, _year: i32, _week: u32) -> Result<Vec<RawGameRecord>> {
            anyhow::bail!("connection refused")
        }
    }

    fn config(name: &str) -> AppConfig {
        let mut config = AppConfig::new();
        config.season.last_week = 3;
        config.output.rankings_path = std::env::temp_dir()
            .join(format!("cfb_rankings_service_{}_{}", name, std::process::id()))
            .join("rankings-data.json");
        let _ = std::fs::remove_file(&config.output.rankings_path);
        config
    }

    #[tokio::test]
    async fn test_total_outage_keeps_previous_snapshot() {
        let config = config("outage");
        let mut service = RankingService::with_parts(config, Box::new(DeadSource), TeamClassifier::embedded().unwrap());

        let err = service.refresh().await.unwrap_err();

        assert!(err.to_string().contains("Every requested week failed"));
        assert!(service.store().load().unwrap().is_none());
        assert_eq!(service.latest().unwrap(), RankingSnapshot::empty());
    }
}
