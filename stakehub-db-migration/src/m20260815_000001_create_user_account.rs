use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000001_create_user_account"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(user_account::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(user_account::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(user_account::Column::Name).string().not_null())
                    .col(
                        ColumnDef::new(user_account::Column::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(user_account::Column::ReferralCode).string())
                    .col(ColumnDef::new(user_account::Column::ReferredBy).string())
                    .col(
                        ColumnDef::new(user_account::Column::AvailableBalance)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(user_account::Column::WalletBalance)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(user_account::Column::TotalStaked)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(user_account::Column::TotalEarnings)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(user_account::Column::TodaysEarning)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(user_account::Column::SellCount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(user_account::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(user_account::Entity).to_owned())
            .await
    }
}
