use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Backings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Backings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Backings::UserId).integer().not_null())
                    .col(ColumnDef::new(Backings::CampaignId).integer().not_null())
                    .col(ColumnDef::new(Backings::RewardId).integer())
                    .col(ColumnDef::new(Backings::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(Backings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_backings_reward_id")
                    .table(Backings::Table)
                    .col(Backings::RewardId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Backings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Backings {
    Table,
    Id,
    UserId,
    CampaignId,
    RewardId,
    Amount,
    CreatedAt,
}
