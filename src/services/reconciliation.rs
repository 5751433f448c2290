//! Reconciliation engine
//!
//! Four sequential phases over persisted state: campaign status, milestone
//! status, reward readiness, reward distribution. Each phase is a pure
//! function of the database plus the injected `now`, and an independent
//! failure domain: a phase error is logged and the remaining phases still
//! run. Partial progress inside a failed phase is accepted; the next
//! scheduled run picks up whatever was left, since every predicate only
//! matches rows that have not transitioned yet.

use sea_orm::{DatabaseConnection, prelude::DateTimeWithTimeZone};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::models::reconciliation::ReconciliationSummary;
use crate::services::blockchain::BlockchainClient;
use crate::services::email::EmailSender;
use crate::services::{campaign_status, milestone_status, reward_distribution, reward_readiness};

pub async fn run_reconciliation(
    db: &DatabaseConnection,
    blockchain: &dyn BlockchainClient,
    email: &dyn EmailSender,
    config: &AppConfig,
    now: DateTimeWithTimeZone,
) -> ReconciliationSummary {
    info!(now = %now, "Starting reconciliation run");

    let mut summary = ReconciliationSummary::default();

    match campaign_status::run(db, now).await {
        Ok(outcome) => {
            summary.activated_campaigns = outcome.activated;
            summary.funded_campaigns = outcome.funded;
            summary.completed_campaigns = outcome.completed;
        }
        Err(e) => error!(error = %e, "Campaign status phase failed"),
    }

    match milestone_status::run(db, now).await {
        Ok(outcome) => {
            summary.delayed_milestones = outcome.delayed;
            summary.upcoming_milestones = outcome.upcoming;
        }
        Err(e) => error!(error = %e, "Milestone status phase failed"),
    }

    match reward_readiness::run(db, now).await {
        Ok(outcome) => {
            summary.rewards_ready_for_claim = outcome.marked_ready;
        }
        Err(e) => error!(error = %e, "Reward readiness phase failed"),
    }

    match reward_distribution::run(db, blockchain, email, config, now).await {
        Ok(outcome) => {
            summary.rewards_distributed = outcome.rewards_distributed;
            summary.emails_sent = outcome.emails_sent;
        }
        Err(e) => error!(error = %e, "Reward distribution phase failed"),
    }

    info!(
        activated_campaigns = summary.activated_campaigns,
        funded_campaigns = summary.funded_campaigns,
        completed_campaigns = summary.completed_campaigns,
        delayed_milestones = summary.delayed_milestones,
        upcoming_milestones = summary.upcoming_milestones,
        rewards_ready_for_claim = summary.rewards_ready_for_claim,
        rewards_distributed = summary.rewards_distributed,
        emails_sent = summary.emails_sent,
        "Reconciliation run finished"
    );

    summary
}
