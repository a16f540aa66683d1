pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_user_account;
mod m20260815_000002_create_product;
mod m20260815_000003_create_referral_code;
mod m20260815_000004_create_stake;
mod m20260815_000005_create_stake_return;
mod m20260815_000006_create_deposit;
mod m20260815_000007_create_withdrawal;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_user_account::Migration),
            Box::new(m20260815_000002_create_product::Migration),
            Box::new(m20260815_000003_create_referral_code::Migration),
            Box::new(m20260815_000004_create_stake::Migration),
            Box::new(m20260815_000005_create_stake_return::Migration),
            Box::new(m20260815_000006_create_deposit::Migration),
            Box::new(m20260815_000007_create_withdrawal::Migration),
        ]
    }
}
