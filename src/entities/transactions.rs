//! SeaORM Entity for transactions
//!
//! Records a completed pledge or reward payout. On-chain details live in
//! typed columns (tx_hash, block_number, bulk_distribution) rather than a
//! free-form metadata blob.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub campaign_id: i32,
    pub reward_id: Option<i32>,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub tx_hash: Option<String>,
    pub block_number: Option<i64>,
    /// True when created by the batch distributor rather than a single claim
    pub bulk_distribution: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
