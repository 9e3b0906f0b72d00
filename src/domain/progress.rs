use log::info;

/// Track progress of a season fetch
pub struct SeasonProgress {
    total: usize,
    fetched: usize,
    failed: usize,
    games: usize,
}

impl SeasonProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: 0,
            failed: 0,
            games: 0,
        }
    }

    pub fn record_fetched(&mut self, games: usize) {
        self.fetched += 1;
        self.games += games;
        self.log_progress();
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.fetched + self.failed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn log_progress(&self) {
        info!(
            "  → Progress: {}/{} weeks ({} fetched, {} failed, {} games)",
            self.current_count(),
            self.total,
            self.fetched,
            self.failed,
            self.games
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_both_kinds_of_week() {
        let mut progress = SeasonProgress::new(3);
        progress.record_fetched(40);
        progress.record_failed();
        progress.record_fetched(0);

        assert_eq!(progress.current_count(), 3);
        assert_eq!(progress.failed(), 1);
    }
}
