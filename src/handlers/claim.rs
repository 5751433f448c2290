//! On-demand reward claim endpoint
//!
//! POST /api/rewards/{reward_id}/claim — a single backer claims their own
//! reward. Precondition checks run in order, each with its own failure
//! mode; the blockchain call happens last so a rejected claim never
//! touches the chain. The prior-transaction check doubles as a claim lock
//! against the batch distributor paying the same backer twice.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set,
};
use tracing::{info, warn};

use crate::AppState;
use crate::entities::prelude::{Backings, Rewards, Transactions, Users};
use crate::entities::transactions::TransactionStatus;
use crate::entities::{backings, rewards, transactions};
use crate::models::activity::{ActivityMetadata, activity_types};
use crate::models::api::ErrorResponse;
use crate::models::claim::ClaimResponse;
use crate::services::activity_log;

type ClaimError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, message: &str) -> ClaimError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn db_error(e: sea_orm::DbErr) -> ClaimError {
    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Database error: {}", e),
    )
}

pub async fn claim_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<ClaimResponse>, ClaimError> {
    // Session wiring lives upstream; the resolved user id arrives as a header
    let user_id: i32 = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Authentication required"))?;

    let user = Users::find_by_id(user_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Authentication required"))?;

    let wallet = user
        .wallet_address
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "No wallet connected"))?
        .to_string();

    let reward = Rewards::find_by_id(reward_id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Reward not found"))?;

    if reward.ready_for_claim_at.is_none() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Reward is not ready to claim yet",
        ));
    }

    let backing = Backings::find()
        .filter(backings::Column::UserId.eq(user.id))
        .filter(backings::Column::CampaignId.eq(reward.campaign_id))
        .filter(backings::Column::RewardId.eq(reward.id))
        .one(&state.db)
        .await
        .map_err(db_error)?;

    if backing.is_none() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "No backing found for this reward",
        ));
    }

    // Claim lock: covers a repeated claim and a prior batch distribution
    let already_paid = Transactions::find()
        .filter(transactions::Column::UserId.eq(user.id))
        .filter(transactions::Column::RewardId.eq(reward.id))
        .filter(transactions::Column::Status.eq(TransactionStatus::Completed))
        .one(&state.db)
        .await
        .map_err(db_error)?;

    if already_paid.is_some() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Reward already claimed or distributed",
        ));
    }

    if let Some(cap) = reward.max_claimable {
        if reward.claimed >= cap {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "Reward claim limit reached",
            ));
        }
    }

    let transfer = state
        .blockchain
        .claim_reward(reward.id, &wallet)
        .await
        .map_err(|e| {
            warn!(reward_id = reward.id, user_id = user.id, error = %e, "Claim transfer failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Blockchain claim failed, please retry",
            )
        })?;

    let now = Utc::now().fixed_offset();

    transactions::ActiveModel {
        user_id: Set(user.id),
        campaign_id: Set(reward.campaign_id),
        reward_id: Set(Some(reward.id)),
        amount: Set(reward.amount),
        status: Set(TransactionStatus::Completed),
        tx_hash: Set(Some(transfer.tx_hash.clone())),
        block_number: Set(transfer.block_number),
        bulk_distribution: Set(false),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(db_error)?;

    let claimed = reward.claimed + 1;
    let mut active: rewards::ActiveModel = reward.clone().into();
    active.claimed = Set(claimed);
    active.update(&state.db).await.map_err(db_error)?;

    activity_log::record(
        &state.db,
        reward.campaign_id,
        Some(user.id),
        activity_types::REWARD_CLAIMED,
        format!("{} claimed reward \"{}\"", user.name, reward.title),
        &ActivityMetadata::RewardClaimed {
            reward_id: reward.id,
            reward_title: reward.title.clone(),
            tx_hash: transfer.tx_hash.clone(),
        },
        now,
    )
    .await
    .map_err(db_error)?;

    info!(
        reward_id = reward.id,
        user_id = user.id,
        tx_hash = %transfer.tx_hash,
        "Reward claimed"
    );

    Ok(Json(ClaimResponse {
        success: true,
        tx_hash: transfer.tx_hash,
        block_number: transfer.block_number,
        claimed,
    }))
}
