//! SeaORM Entity for the activity audit log
//!
//! Append-only. Every reconciliation transition and distribution event
//! emits one row. Reconciliation never reads this table back; state is
//! always re-derived from the primary entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: i32,
    pub user_id: Option<i32>,
    pub activity_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Serialized `ActivityMetadata`, tagged by kind
    pub metadata: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
