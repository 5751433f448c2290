//! Reward readiness transition phase
//!
//! Flips a reward into claimable state once its delivery date has passed.
//! Restricted to rewards with no backings: rewards that have backers are
//! left for the distribution phase, which marks them ready itself after the
//! payout. Without that restriction this sweep would mark every due reward
//! ready and the distribution phase's re-query would never match anything.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
    prelude::DateTimeWithTimeZone,
};
use tracing::{error, info};

use crate::entities::prelude::{Backings, Rewards};
use crate::entities::{backings, rewards};
use crate::models::activity::{ActivityMetadata, activity_types};
use crate::services::activity_log;

#[derive(Debug, Default)]
pub struct ReadinessPhaseOutcome {
    pub marked_ready: u64,
}

pub async fn run(
    db: &DatabaseConnection,
    now: DateTimeWithTimeZone,
) -> Result<ReadinessPhaseOutcome, DbErr> {
    let candidates = Rewards::find()
        .filter(rewards::Column::ReadyForClaimAt.is_null())
        .filter(rewards::Column::DeliveryDate.is_not_null())
        .filter(rewards::Column::DeliveryDate.lte(now))
        .all(db)
        .await?;

    let mut marked_ready = 0;

    for reward in candidates {
        // One malformed reward must never abort the batch
        match mark_if_backerless(db, &reward, now).await {
            Ok(true) => marked_ready += 1,
            Ok(false) => {}
            Err(e) => {
                error!(reward_id = reward.id, error = %e, "Failed to mark reward ready");
            }
        }
    }

    info!(marked_ready = marked_ready, "Reward readiness phase finished");

    Ok(ReadinessPhaseOutcome { marked_ready })
}

async fn mark_if_backerless(
    db: &DatabaseConnection,
    reward: &rewards::Model,
    now: DateTimeWithTimeZone,
) -> Result<bool, DbErr> {
    let backers = Backings::find()
        .filter(backings::Column::RewardId.eq(reward.id))
        .count(db)
        .await?;

    if backers > 0 {
        return Ok(false);
    }

    let mut active: rewards::ActiveModel = reward.clone().into();
    active.ready_for_claim_at = Set(Some(now));
    active.update(db).await?;

    activity_log::record(
        db,
        reward.campaign_id,
        None,
        activity_types::REWARD_CLAIMED,
        format!("Reward \"{}\" is ready to claim", reward.title),
        &ActivityMetadata::RewardReady {
            reward_id: reward.id,
            reward_title: reward.title.clone(),
        },
        now,
    )
    .await?;

    Ok(true)
}
