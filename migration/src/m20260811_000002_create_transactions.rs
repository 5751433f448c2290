use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).integer().not_null())
                    .col(ColumnDef::new(Transactions::CampaignId).integer().not_null())
                    .col(ColumnDef::new(Transactions::RewardId).integer())
                    .col(ColumnDef::new(Transactions::Amount).decimal().not_null())
                    .col(ColumnDef::new(Transactions::Status).string().not_null())
                    .col(ColumnDef::new(Transactions::TxHash).string())
                    .col(ColumnDef::new(Transactions::BlockNumber).big_integer())
                    .col(
                        ColumnDef::new(Transactions::BulkDistribution)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The claim path looks up prior payouts by (user, reward)
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_user_reward")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::RewardId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    CampaignId,
    RewardId,
    Amount,
    Status,
    TxHash,
    BlockNumber,
    BulkDistribution,
    CreatedAt,
}
