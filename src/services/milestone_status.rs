//! Milestone status transition phase
//!
//! Marks overdue milestones DELAYED (sticky) and counts milestones due
//! within the next week. The upcoming set triggers no mutation; the count
//! is reported for the run summary.

use chrono::Duration;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    prelude::DateTimeWithTimeZone,
    sea_query::Expr,
};
use tracing::info;

use crate::entities::milestones::{self, MilestoneStatus};
use crate::entities::prelude::Milestones;
use crate::models::activity::{ActivityMetadata, activity_types};
use crate::services::activity_log;

/// Look-ahead window for the upcoming-milestone report
const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Default)]
pub struct MilestonePhaseOutcome {
    pub delayed: u64,
    pub upcoming: u64,
}

pub async fn run(
    db: &DatabaseConnection,
    now: DateTimeWithTimeZone,
) -> Result<MilestonePhaseOutcome, DbErr> {
    let open_statuses = [MilestoneStatus::Pending, MilestoneStatus::InProgress];

    let overdue = Milestones::find()
        .filter(milestones::Column::Status.is_in(open_statuses))
        .filter(milestones::Column::TargetDate.is_not_null())
        .filter(milestones::Column::TargetDate.lte(now))
        .all(db)
        .await?;

    let delayed = if overdue.is_empty() {
        0
    } else {
        let result = Milestones::update_many()
            .col_expr(milestones::Column::Status, Expr::value(MilestoneStatus::Delayed))
            .filter(milestones::Column::Status.is_in(open_statuses))
            .filter(milestones::Column::TargetDate.is_not_null())
            .filter(milestones::Column::TargetDate.lte(now))
            .exec(db)
            .await?;

        for milestone in &overdue {
            activity_log::record(
                db,
                milestone.campaign_id,
                None,
                activity_types::STATUS_CHANGED,
                format!("Milestone \"{}\" is delayed", milestone.title),
                &ActivityMetadata::MilestoneDelayed {
                    milestone_id: milestone.id,
                    milestone_title: milestone.title.clone(),
                },
                now,
            )
            .await?;
        }

        result.rows_affected
    };

    let upcoming = Milestones::find()
        .filter(milestones::Column::Status.is_in(open_statuses))
        .filter(milestones::Column::TargetDate.gt(now))
        .filter(milestones::Column::TargetDate.lte(now + Duration::days(UPCOMING_WINDOW_DAYS)))
        .count(db)
        .await?;

    info!(
        delayed = delayed,
        upcoming = upcoming,
        "Milestone status phase finished"
    );

    Ok(MilestonePhaseOutcome { delayed, upcoming })
}
