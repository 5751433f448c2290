use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Milestones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Milestones::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Milestones::CampaignId).integer().not_null())
                    .col(ColumnDef::new(Milestones::Title).string().not_null())
                    .col(ColumnDef::new(Milestones::Description).text())
                    .col(ColumnDef::new(Milestones::TargetDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Milestones::CompletionPercentage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Milestones::FundingAmount)
                            .decimal()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(Milestones::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Milestones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_milestones_campaign_id")
                    .table(Milestones::Table)
                    .col(Milestones::CampaignId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Milestones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Milestones {
    Table,
    Id,
    CampaignId,
    Title,
    Description,
    TargetDate,
    CompletionPercentage,
    FundingAmount,
    Status,
    CreatedAt,
}
