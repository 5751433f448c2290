pub use super::activities::Entity as Activities;
pub use super::backings::Entity as Backings;
pub use super::campaigns::Entity as Campaigns;
pub use super::milestones::Entity as Milestones;
pub use super::rewards::Entity as Rewards;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
