use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::trainer::Trainer;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops trainer sessions idle longer than `ttl`.
pub fn spawn_session_cleanup(trainer: Arc<Trainer>, ttl: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let start = Instant::now();
            debug!("Starting session cleanup cycle");

            let expired = trainer.sweep_idle(ttl).await;
            if expired > 0 {
                info!(
                    expired_sessions = expired,
                    duration_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
                    "Session cleanup completed"
                );
            }
        }
    })
}
