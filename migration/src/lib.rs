pub use sea_orm_migration::prelude::*;

mod m20260810_000001_create_users;
mod m20260810_000002_create_campaigns;
mod m20260810_000003_create_milestones;
mod m20260810_000004_create_rewards;
mod m20260811_000001_create_backings;
mod m20260811_000002_create_transactions;
mod m20260811_000003_create_activities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_users::Migration),
            Box::new(m20260810_000002_create_campaigns::Migration),
            Box::new(m20260810_000003_create_milestones::Migration),
            Box::new(m20260810_000004_create_rewards::Migration),
            Box::new(m20260811_000001_create_backings::Migration),
            Box::new(m20260811_000002_create_transactions::Migration),
            Box::new(m20260811_000003_create_activities::Migration),
        ]
    }
}
