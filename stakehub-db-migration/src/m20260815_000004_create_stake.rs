use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000004_create_stake"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(stake::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(stake::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(stake::Column::UserId).string().not_null())
                    .col(ColumnDef::new(stake::Column::ProductId).string().not_null())
                    .col(ColumnDef::new(stake::Column::ProductTitle).string().not_null())
                    .col(ColumnDef::new(stake::Column::StakeAmount).decimal().not_null())
                    .col(
                        ColumnDef::new(stake::Column::IncomePercentage)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(stake::Column::ProfitAmount).decimal().not_null())
                    .col(ColumnDef::new(stake::Column::HandlingFee).decimal().not_null())
                    .col(ColumnDef::new(stake::Column::DurationDays).integer().not_null())
                    .col(
                        ColumnDef::new(stake::Column::MaturityDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(stake::Column::Status).string().not_null())
                    .col(ColumnDef::new(stake::Column::AttachmentPath).string())
                    .col(ColumnDef::new(stake::Column::ReferredBy).string())
                    .col(ColumnDef::new(stake::Column::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(stake::Column::CompletedAt).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stake_user_created")
                    .table(stake::Entity)
                    .col(stake::Column::UserId)
                    .col(stake::Column::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(stake::Entity).to_owned())
            .await
    }
}
