use actix_web::web;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::{use_cases::media::ORPHAN_GRACE, AppState};

const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Hourly housekeeping: drops stored media no row references any more and
/// forgets idle login-limiter clients.
pub async fn start_maintenance_task(state: web::Data<AppState>) {
    let mut interval = interval(MAINTENANCE_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        run_maintenance(&state).await;
    }
}

pub async fn run_maintenance(state: &AppState) {
    match state.media_handler.sweep_orphans(ORPHAN_GRACE).await {
        Ok(0) => tracing::debug!("No orphaned media objects"),
        Ok(count) => tracing::info!("Removed {} orphaned media objects", count),
        Err(e) => tracing::error!("Media sweep failed: {}", e),
    }

    let evicted = state.auth_handler.limiter.evict_idle();
    if evicted > 0 {
        tracing::debug!("Evicted {} idle login limiter entries", evicted);
    }
}
