//! Append-only activity log writes
//!
//! Every state transition and distribution event lands here as one row.
//! The log is user-facing history only; reconciliation never reads it back.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::entities::activities;
use crate::models::activity::ActivityMetadata;

pub async fn record(
    db: &DatabaseConnection,
    campaign_id: i32,
    user_id: Option<i32>,
    activity_type: &str,
    description: String,
    metadata: &ActivityMetadata,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<(), DbErr> {
    let metadata = serde_json::to_value(metadata)
        .map_err(|e| DbErr::Custom(format!("activity metadata serialization: {}", e)))?;

    activities::ActiveModel {
        campaign_id: Set(campaign_id),
        user_id: Set(user_id),
        activity_type: Set(activity_type.to_string()),
        description: Set(description),
        metadata: Set(metadata),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}
