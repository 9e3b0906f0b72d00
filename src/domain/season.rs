use super::models::RawGameRecord;

/// Result of fetching one week. A failed week contributes no games.
#[derive(Debug, Clone, PartialEq)]
pub enum WeekOutcome {
    Fetched { week: u32, games: Vec<RawGameRecord> },
    Failed { week: u32, reason: String },
}

impl WeekOutcome {
    pub fn week(&self) -> u32 {
        match self {
            WeekOutcome::Fetched { week, .. } | WeekOutcome::Failed { week, .. } => *week,
        }
    }

    pub fn games(&self) -> &[RawGameRecord] {
        match self {
            WeekOutcome::Fetched { games, .. } => games,
            WeekOutcome::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, WeekOutcome::Failed { .. })
    }
}

/// Every requested week of a season, in fetch order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonFetch {
    outcomes: Vec<WeekOutcome>,
}

impl SeasonFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: WeekOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[WeekOutcome] {
        &self.outcomes
    }

    pub fn games(&self) -> Vec<RawGameRecord> {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.games().iter().cloned())
            .collect()
    }

    pub fn game_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.games().len()).sum()
    }

    pub fn failed_weeks(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|o| o.is_failed())
            .map(WeekOutcome::week)
            .collect()
    }

    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(WeekOutcome::is_failed)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
