//! In-process reconciliation job
//!
//! Optional fallback for deployments without an external cron: runs the
//! same engine the trigger endpoint runs, on a fixed interval.
//! Supports graceful shutdown via SIGTERM/SIGINT signals.

use chrono::Utc;
use std::env;
use tokio::time::{Duration as TokioDuration, interval};
use tracing::{info, warn};

use crate::AppState;
use crate::services::reconciliation::run_reconciliation;

/// Environment variable enabling the job (interval in seconds)
const ENV_RECONCILE_INTERVAL: &str = "RECONCILE_INTERVAL_SECS";

/// Start the reconciliation job if an interval is configured.
///
/// Spawns a background task that runs the full four-phase reconciliation
/// at the configured interval. Disabled unless `RECONCILE_INTERVAL_SECS`
/// is set; external single-flight scheduling via the trigger endpoint is
/// the primary mode.
pub async fn start_reconciliation_job(state: AppState) {
    let interval_secs: u64 = match env::var(ENV_RECONCILE_INTERVAL)
        .ok()
        .and_then(|s| s.parse().ok())
    {
        Some(secs) => secs,
        None => {
            warn!(
                "RECONCILE_INTERVAL_SECS not set - in-process reconciliation job disabled. \
                 Set RECONCILE_INTERVAL_SECS to enable."
            );
            return;
        }
    };

    tokio::spawn(async move {
        info!(
            interval_secs = interval_secs,
            "Reconciliation job started successfully"
        );

        let mut interval = interval(TokioDuration::from_secs(interval_secs));

        loop {
            tokio::select! {
                // Handle shutdown signal gracefully
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received, stopping reconciliation job gracefully");
                    break;
                }
                // Normal interval tick
                _ = interval.tick() => {
                    let now = Utc::now().fixed_offset();
                    let summary = run_reconciliation(
                        &state.db,
                        &*state.blockchain,
                        &*state.email,
                        &state.config,
                        now,
                    )
                    .await;

                    info!(
                        rewards_distributed = summary.rewards_distributed,
                        emails_sent = summary.emails_sent,
                        "Scheduled reconciliation tick completed"
                    );
                }
            }
        }

        info!("Reconciliation job stopped");
    });
}
