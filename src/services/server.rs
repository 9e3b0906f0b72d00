use anyhow::Result;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::cors::CorsLayer;

use super::ranking::RankingService;
use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::domain::RankingSnapshot;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let service = RankingService::new(self.config.clone())?;

        // Readers get a valid document even before the first update
        if service.store().load()?.is_none() {
            info!("Initializing {}", service.store().path().display());
            service.store().save(&RankingSnapshot::empty())?;
        }

        let state = Arc::new(AppState::new(service));
        match self.config.server.refresh_interval() {
            Some(every) => {
                info!("Refreshing rankings now and every {} minutes", self.config.server.refresh_minutes);
                spawn_refresh_loop(state.clone(), every);
            }
            None => info!("Scheduled refresh disabled"),
        }

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Refresh immediately, then once per `every`. A failed refresh is logged and
/// the loop keeps going.
pub fn spawn_refresh_loop(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let mut service = state.rankings.lock().await;
            match service.refresh().await {
                Ok(snapshot) => info!("Scheduled refresh ranked {} teams", snapshot.teams.len()),
                Err(e) => warn!("Scheduled refresh failed: {:#}", e),
            }
        }
    })
}
