// src/lib.rs

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::blockchain::BlockchainClient;
use crate::services::email::EmailSender;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub blockchain: Arc<dyn BlockchainClient>,
    pub email: Arc<dyn EmailSender>,
}

pub mod config;

pub mod entities {
    pub mod prelude;

    pub mod activities;
    pub mod backings;
    pub mod campaigns;
    pub mod milestones;
    pub mod rewards;
    pub mod transactions;
    pub mod users;
}

pub mod services {
    pub mod activity_log;
    pub mod blockchain;
    pub mod campaign_status;
    pub mod email;
    pub mod milestone_status;
    pub mod reconciliation;
    pub mod reward_distribution;
    pub mod reward_readiness;
}

pub mod handlers {
    pub mod claim;
    pub mod reconcile;
}

pub mod jobs {
    pub mod reconciliation_job;
}

pub mod models {
    pub mod activity;
    pub mod api;
    pub mod claim;
    pub mod reconciliation;
}
