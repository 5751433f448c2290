#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, Set,
    prelude::DateTimeWithTimeZone,
};
use sea_orm_migration::MigratorTrait;

use fundstack_backend::AppState;
use fundstack_backend::config::AppConfig;
use fundstack_backend::entities::campaigns::CampaignStatus;
use fundstack_backend::entities::milestones::MilestoneStatus;
use fundstack_backend::entities::{backings, campaigns, milestones, rewards, users};
use fundstack_backend::services::blockchain::{BlockchainClient, BlockchainError, TxOutcome};
use fundstack_backend::services::email::{ClaimEmail, EmailSender};

/// Fresh in-memory database with the full schema applied.
///
/// A single pooled connection keeps every query on the same SQLite memory
/// instance.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Deterministic "now" injected into every reconciliation run under test
pub fn fixed_now() -> DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0)
        .unwrap()
        .fixed_offset()
}

pub fn days_ago(days: i64) -> DateTimeWithTimeZone {
    fixed_now() - chrono::Duration::days(days)
}

pub fn days_ahead(days: i64) -> DateTimeWithTimeZone {
    fixed_now() + chrono::Duration::days(days)
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        rpc_url: "http://localhost:8545".to_string(),
        vault_address: "0x0000000000000000000000000000000000000001".to_string(),
        distributor_private_key: "deadbeef".to_string(),
        email_api_url: "http://localhost:9999/emails".to_string(),
        email_api_key: "test-key".to_string(),
        email_from: "rewards@test.local".to_string(),
        app_base_url: "https://fundstack.test".to_string(),
        cron_secret: "test-cron-secret".to_string(),
        port: 0,
    }
}

pub fn build_state(
    db: DatabaseConnection,
    blockchain: Arc<MockBlockchain>,
    email: Arc<MockEmail>,
) -> AppState {
    AppState {
        db,
        config: Arc::new(test_config()),
        blockchain,
        email,
    }
}

// ---------------------------------------------------------------------------
// Mocks

/// Records calls; fails every call when constructed with `failing()`.
pub struct MockBlockchain {
    pub fail: bool,
    pub distributions: Mutex<Vec<(Vec<String>, Vec<Decimal>)>>,
    pub claims: Mutex<Vec<(i32, String)>>,
}

impl MockBlockchain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            distributions: Mutex::new(Vec::new()),
            claims: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            distributions: Mutex::new(Vec::new()),
            claims: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl BlockchainClient for MockBlockchain {
    async fn distribute_rewards(
        &self,
        recipients: Vec<String>,
        amounts: Vec<Decimal>,
    ) -> Result<TxOutcome, BlockchainError> {
        self.distributions
            .lock()
            .unwrap()
            .push((recipients, amounts));

        if self.fail {
            return Err(BlockchainError::Transaction("mock failure".to_string()));
        }

        Ok(TxOutcome {
            tx_hash: "0xdistribution".to_string(),
            block_number: Some(100),
        })
    }

    async fn claim_reward(
        &self,
        reward_id: i32,
        recipient: &str,
    ) -> Result<TxOutcome, BlockchainError> {
        self.claims
            .lock()
            .unwrap()
            .push((reward_id, recipient.to_string()));

        if self.fail {
            return Err(BlockchainError::Transaction("mock failure".to_string()));
        }

        Ok(TxOutcome {
            tx_hash: "0xclaim".to_string(),
            block_number: Some(200),
        })
    }
}

/// Accepts every message and records it.
pub struct MockEmail {
    pub sent: Mutex<Vec<ClaimEmail>>,
}

impl MockEmail {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl EmailSender for MockEmail {
    async fn send_claim_email(&self, email: &ClaimEmail) -> bool {
        self.sent.lock().unwrap().push(email.clone());
        true
    }
}

// ---------------------------------------------------------------------------
// Seed helpers

pub async fn insert_user(
    db: &DatabaseConnection,
    name: &str,
    email: Option<&str>,
    wallet: Option<&str>,
) -> i32 {
    users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.map(str::to_string)),
        wallet_address: Set(wallet.map(str::to_string)),
        created_at: Set(fixed_now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
    .id
}

pub async fn insert_campaign(
    db: &DatabaseConnection,
    slug: &str,
    status: CampaignStatus,
    goal: Decimal,
    raised: Decimal,
    start: DateTimeWithTimeZone,
    end: DateTimeWithTimeZone,
) -> i32 {
    campaigns::ActiveModel {
        slug: Set(slug.to_string()),
        title: Set(format!("Campaign {}", slug)),
        description: Set(None),
        goal: Set(goal),
        raised_amount: Set(raised),
        start_date: Set(start),
        end_date: Set(end),
        status: Set(status),
        is_deleted: Set(false),
        creator_id: Set(1),
        created_at: Set(fixed_now()),
        updated_at: Set(fixed_now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert campaign")
    .id
}

pub async fn insert_milestone(
    db: &DatabaseConnection,
    campaign_id: i32,
    title: &str,
    status: MilestoneStatus,
    target_date: Option<DateTimeWithTimeZone>,
) -> i32 {
    milestones::ActiveModel {
        campaign_id: Set(campaign_id),
        title: Set(title.to_string()),
        description: Set(None),
        target_date: Set(target_date),
        completion_percentage: Set(0),
        funding_amount: Set(Decimal::ZERO),
        status: Set(status),
        created_at: Set(fixed_now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert milestone")
    .id
}

pub async fn insert_reward(
    db: &DatabaseConnection,
    campaign_id: i32,
    title: &str,
    amount: Decimal,
    delivery_date: Option<DateTimeWithTimeZone>,
    ready_for_claim_at: Option<DateTimeWithTimeZone>,
) -> i32 {
    rewards::ActiveModel {
        campaign_id: Set(campaign_id),
        title: Set(title.to_string()),
        description: Set(None),
        amount: Set(amount),
        delivery_date: Set(delivery_date),
        ready_for_claim_at: Set(ready_for_claim_at),
        claimed: Set(0),
        max_claimable: Set(None),
        created_at: Set(fixed_now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert reward")
    .id
}

pub async fn insert_backing(
    db: &DatabaseConnection,
    user_id: i32,
    campaign_id: i32,
    reward_id: Option<i32>,
    amount: Decimal,
) -> i32 {
    backings::ActiveModel {
        user_id: Set(user_id),
        campaign_id: Set(campaign_id),
        reward_id: Set(reward_id),
        amount: Set(amount),
        created_at: Set(fixed_now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert backing")
    .id
}
