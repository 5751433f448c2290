//! Scheduler trigger endpoint
//!
//! POST /api/cron/reconcile — invoked by the external scheduler. Authorized
//! via the shared-secret bearer token or the scheduler's user agent; an
//! unauthorized request is rejected before any phase runs.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chrono::Utc;

use crate::AppState;
use crate::models::api::ErrorResponse;
use crate::models::reconciliation::ReconciliationSummary;
use crate::services::reconciliation::run_reconciliation;

/// User agent prefix presented by the hosted cron scheduler
const SCHEDULER_USER_AGENT_PREFIX: &str = "vercel-cron/";

pub async fn trigger_reconciliation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ReconciliationSummary>, (StatusCode, Json<ErrorResponse>)> {
    if !is_authorized(&headers, &state.config.cron_secret) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        ));
    }

    let now = Utc::now().fixed_offset();
    let summary = run_reconciliation(
        &state.db,
        &*state.blockchain,
        &*state.email,
        &state.config,
        now,
    )
    .await;

    Ok(Json(summary))
}

fn is_authorized(headers: &HeaderMap, cron_secret: &str) -> bool {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if auth
            .strip_prefix("Bearer ")
            .is_some_and(|token| !cron_secret.is_empty() && token == cron_secret)
        {
            return true;
        }
    }

    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.starts_with(SCHEDULER_USER_AGENT_PREFIX))
}
