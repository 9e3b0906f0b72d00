use tokio::sync::Mutex;

use crate::services::ranking::RankingService;
use crate::store::SnapshotStore;

pub mod rankings;

pub struct AppState {
    /// Updates hold this lock for the whole refresh, so they never interleave
    pub rankings: Mutex<RankingService>,
    pub store: SnapshotStore,
}

impl AppState {
    pub fn new(service: RankingService) -> Self {
        let store = service.store().clone();
        Self {
            rankings: Mutex::new(service),
            store,
        }
    }
}
