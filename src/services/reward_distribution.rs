//! Reward distribution phase
//!
//! Re-derives the eligible set from persisted state (never from the
//! readiness phase's in-memory results): rewards past their delivery date
//! whose ready_for_claim_at is still null. Per reward: one batch transfer
//! paying every valid backer the reward amount, one transaction row per
//! paid backer, the readiness flag, one activity row, and best-effort
//! claim emails. A blockchain failure leaves the reward untouched so the
//! next run retries it; a failure on one reward never aborts the others.

use std::collections::HashMap;

use futures_util::future::join_all;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    prelude::DateTimeWithTimeZone,
};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::entities::prelude::{Backings, Campaigns, Rewards, Users};
use crate::entities::transactions::TransactionStatus;
use crate::entities::{backings, rewards, transactions, users};
use crate::models::activity::{ActivityMetadata, activity_types};
use crate::services::activity_log;
use crate::services::blockchain::BlockchainClient;
use crate::services::email::{ClaimEmail, EmailSender, claim_url};

#[derive(Debug, Default)]
pub struct DistributionPhaseOutcome {
    pub rewards_distributed: u64,
    pub emails_sent: u64,
}

#[derive(Debug, Default)]
struct PerRewardOutcome {
    distributed: bool,
    emails_sent: u64,
}

pub async fn run(
    db: &DatabaseConnection,
    blockchain: &dyn BlockchainClient,
    email: &dyn EmailSender,
    config: &AppConfig,
    now: DateTimeWithTimeZone,
) -> Result<DistributionPhaseOutcome, DbErr> {
    let due_rewards = Rewards::find()
        .filter(rewards::Column::ReadyForClaimAt.is_null())
        .filter(rewards::Column::DeliveryDate.is_not_null())
        .filter(rewards::Column::DeliveryDate.lt(now))
        .all(db)
        .await?;

    let mut outcome = DistributionPhaseOutcome::default();

    for reward in due_rewards {
        match process_reward(db, blockchain, email, config, &reward, now).await {
            Ok(per_reward) => {
                if per_reward.distributed {
                    outcome.rewards_distributed += 1;
                }
                outcome.emails_sent += per_reward.emails_sent;
            }
            Err(e) => {
                error!(reward_id = reward.id, error = %e, "Reward distribution failed");
            }
        }
    }

    info!(
        rewards_distributed = outcome.rewards_distributed,
        emails_sent = outcome.emails_sent,
        "Reward distribution phase finished"
    );

    Ok(outcome)
}

async fn process_reward(
    db: &DatabaseConnection,
    blockchain: &dyn BlockchainClient,
    email: &dyn EmailSender,
    config: &AppConfig,
    reward: &rewards::Model,
    now: DateTimeWithTimeZone,
) -> Result<PerRewardOutcome, DbErr> {
    let campaign = Campaigns::find_by_id(reward.campaign_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "campaign {} for reward {}",
                reward.campaign_id, reward.id
            ))
        })?;

    let backers = Backings::find()
        .filter(backings::Column::RewardId.eq(reward.id))
        .all(db)
        .await?;

    // No backers: nothing to pay and nothing to mark; the readiness sweep
    // owns this case.
    if backers.is_empty() {
        return Ok(PerRewardOutcome::default());
    }

    let user_ids: Vec<i32> = backers.iter().map(|b| b.user_id).collect();
    let users_by_id: HashMap<i32, users::Model> = Users::find()
        .filter(users::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let valid_backers: Vec<(&backings::Model, &users::Model, String)> = backers
        .iter()
        .filter_map(|b| {
            let user = users_by_id.get(&b.user_id)?;
            let wallet = user.wallet_address.as_deref()?.trim();
            if wallet.is_empty() || b.amount <= Decimal::ZERO {
                return None;
            }
            Some((b, user, wallet.to_string()))
        })
        .collect();

    let mut tx_hash = None;

    if !valid_backers.is_empty() {
        let recipients: Vec<String> = valid_backers.iter().map(|(_, _, w)| w.clone()).collect();
        // Every valid backer receives the reward amount, not their pledge
        let amounts: Vec<Decimal> = valid_backers.iter().map(|_| reward.amount).collect();

        let transfer = match blockchain.distribute_rewards(recipients, amounts).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // Leave ready_for_claim_at null; the next run retries
                warn!(
                    reward_id = reward.id,
                    backers = valid_backers.len(),
                    error = %e,
                    "Batch distribution failed, will retry next run"
                );
                return Ok(PerRewardOutcome::default());
            }
        };

        let inserts = valid_backers.iter().map(|(backer, _, _)| {
            transactions::ActiveModel {
                user_id: Set(backer.user_id),
                campaign_id: Set(reward.campaign_id),
                reward_id: Set(Some(reward.id)),
                amount: Set(reward.amount),
                status: Set(TransactionStatus::Completed),
                tx_hash: Set(Some(transfer.tx_hash.clone())),
                block_number: Set(transfer.block_number),
                bulk_distribution: Set(true),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(db)
        });

        // Inserts are independent; one failure must not block the others
        for (result, (backer, _, _)) in join_all(inserts).await.into_iter().zip(&valid_backers) {
            if let Err(e) = result {
                error!(
                    reward_id = reward.id,
                    user_id = backer.user_id,
                    error = %e,
                    "Failed to persist distribution transaction"
                );
            }
        }

        tx_hash = Some(transfer.tx_hash);
    }

    // The transfer succeeded or there was nothing to transfer; either way
    // the reward is now claimable.
    let mut active: rewards::ActiveModel = reward.clone().into();
    active.ready_for_claim_at = Set(Some(now));
    active.update(db).await?;

    let metadata = match &tx_hash {
        Some(hash) => ActivityMetadata::RewardDistributed {
            reward_id: reward.id,
            reward_title: reward.title.clone(),
            tx_hash: hash.clone(),
            recipients: valid_backers.len() as u64,
        },
        None => ActivityMetadata::RewardReady {
            reward_id: reward.id,
            reward_title: reward.title.clone(),
        },
    };

    activity_log::record(
        db,
        reward.campaign_id,
        None,
        activity_types::REWARD_CLAIMED,
        format!("Reward \"{}\" is ready to claim", reward.title),
        &metadata,
        now,
    )
    .await?;

    // Every backer with an email gets the claim link, wallet or not
    let link = claim_url(&config.app_base_url, &campaign.slug, reward.id);
    let mut emails_sent = 0;

    for backer in &backers {
        let Some(user) = users_by_id.get(&backer.user_id) else {
            continue;
        };
        let Some(address) = user.email.as_deref().map(str::trim) else {
            continue;
        };
        if address.is_empty() {
            continue;
        }

        let message = ClaimEmail {
            to: address.to_string(),
            user_name: user.name.clone(),
            reward_title: reward.title.clone(),
            campaign_title: campaign.title.clone(),
            claim_url: link.clone(),
        };

        if email.send_claim_email(&message).await {
            emails_sent += 1;
        }
    }

    Ok(PerRewardOutcome {
        distributed: tx_hash.is_some(),
        emails_sent,
    })
}
