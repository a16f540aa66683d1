use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000005_create_stake_return"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(stake_return::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(stake_return::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(stake_return::Column::StakeId).string().not_null())
                    .col(ColumnDef::new(stake_return::Column::UserId).string().not_null())
                    .col(
                        ColumnDef::new(stake_return::Column::OriginalAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(stake_return::Column::ProfitAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(stake_return::Column::HandlingFee)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(stake_return::Column::TotalReturnAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(stake_return::Column::MaturityDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(stake_return::Column::Status).string().not_null())
                    .col(ColumnDef::new(stake_return::Column::ProcessedAt).big_integer())
                    .col(
                        ColumnDef::new(stake_return::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // the sweep scans on (status, maturity_date)
        manager
            .create_index(
                Index::create()
                    .name("idx_stake_return_status_maturity")
                    .table(stake_return::Entity)
                    .col(stake_return::Column::Status)
                    .col(stake_return::Column::MaturityDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(stake_return::Entity).to_owned())
            .await
    }
}
