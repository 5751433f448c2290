use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rewards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rewards::CampaignId).integer().not_null())
                    .col(ColumnDef::new(Rewards::Title).string().not_null())
                    .col(ColumnDef::new(Rewards::Description).text())
                    .col(ColumnDef::new(Rewards::Amount).decimal().not_null())
                    .col(ColumnDef::new(Rewards::DeliveryDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Rewards::ReadyForClaimAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Rewards::Claimed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Rewards::MaxClaimable).integer())
                    .col(
                        ColumnDef::new(Rewards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rewards_campaign_id")
                    .table(Rewards::Table)
                    .col(Rewards::CampaignId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rewards::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Rewards {
    Table,
    Id,
    CampaignId,
    Title,
    Description,
    Amount,
    DeliveryDate,
    ReadyForClaimAt,
    Claimed,
    MaxClaimable,
    CreatedAt,
}
