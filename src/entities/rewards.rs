//! SeaORM Entity for campaign rewards
//!
//! `amount` doubles as the pledge threshold and the per-backer payout amount
//! used by the batch distributor. `ready_for_claim_at` is set exactly once
//! and never cleared.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rewards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub amount: Decimal,
    pub delivery_date: Option<DateTimeWithTimeZone>,
    /// Null until the reward becomes claimable; set once, idempotently
    pub ready_for_claim_at: Option<DateTimeWithTimeZone>,
    /// Number of single-path claims; never incremented by batch distribution
    pub claimed: i32,
    pub max_claimable: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
