//! Campaign status transition phase
//!
//! Brings every non-deleted campaign's status in line with the injected
//! `now` and its funding state. Three bulk predicates, each committed
//! separately. FUNDED takes precedence over COMPLETED: the funded predicate
//! runs before the completed predicate, so a campaign that is past its end
//! date and fully funded in the same run ends up FUNDED.

use sea_orm::{
    ActiveEnum, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    prelude::DateTimeWithTimeZone,
    sea_query::Expr,
};
use tracing::info;

use crate::entities::campaigns::{self, CampaignStatus};
use crate::entities::prelude::Campaigns;
use crate::models::activity::{ActivityMetadata, activity_types};
use crate::services::activity_log;

#[derive(Debug, Default)]
pub struct CampaignPhaseOutcome {
    pub activated: u64,
    pub funded: u64,
    pub completed: u64,
}

pub async fn run(
    db: &DatabaseConnection,
    now: DateTimeWithTimeZone,
) -> Result<CampaignPhaseOutcome, DbErr> {
    let activated = transition(
        db,
        now,
        CampaignStatus::Draft,
        Condition::all().add(campaigns::Column::StartDate.lte(now)),
        CampaignStatus::Active,
    )
    .await?;

    let funded = transition(
        db,
        now,
        CampaignStatus::Active,
        Condition::all().add(
            Expr::col(campaigns::Column::RaisedAmount).gte(Expr::col(campaigns::Column::Goal)),
        ),
        CampaignStatus::Funded,
    )
    .await?;

    let completed = transition(
        db,
        now,
        CampaignStatus::Active,
        Condition::all().add(campaigns::Column::EndDate.lte(now)),
        CampaignStatus::Completed,
    )
    .await?;

    info!(
        activated = activated,
        funded = funded,
        completed = completed,
        "Campaign status phase finished"
    );

    Ok(CampaignPhaseOutcome {
        activated,
        funded,
        completed,
    })
}

/// Apply one bulk predicate: select the matching campaigns for the audit
/// trail, overwrite their status, and append one STATUS_CHANGED activity
/// per transitioned campaign.
async fn transition(
    db: &DatabaseConnection,
    now: DateTimeWithTimeZone,
    from: CampaignStatus,
    predicate: Condition,
    to: CampaignStatus,
) -> Result<u64, DbErr> {
    let candidates = Campaigns::find()
        .filter(campaigns::Column::IsDeleted.eq(false))
        .filter(campaigns::Column::Status.eq(from))
        .filter(predicate.clone())
        .all(db)
        .await?;

    if candidates.is_empty() {
        return Ok(0);
    }

    let result = Campaigns::update_many()
        .col_expr(campaigns::Column::Status, Expr::value(to))
        .col_expr(campaigns::Column::UpdatedAt, Expr::value(now))
        .filter(campaigns::Column::IsDeleted.eq(false))
        .filter(campaigns::Column::Status.eq(from))
        .filter(predicate)
        .exec(db)
        .await?;

    let new_status = to.to_value();
    for campaign in &candidates {
        activity_log::record(
            db,
            campaign.id,
            None,
            activity_types::STATUS_CHANGED,
            format!("Campaign \"{}\" is now {}", campaign.title, new_status),
            &ActivityMetadata::CampaignStatusChanged {
                new_status: new_status.clone(),
            },
            now,
        )
        .await?;
    }

    Ok(result.rows_affected)
}
