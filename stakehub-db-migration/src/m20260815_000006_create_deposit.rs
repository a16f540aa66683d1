use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000006_create_deposit"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(deposit::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(deposit::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(deposit::Column::UserId).string().not_null())
                    .col(ColumnDef::new(deposit::Column::NetworkType).string().not_null())
                    .col(ColumnDef::new(deposit::Column::Amount).decimal().not_null())
                    .col(ColumnDef::new(deposit::Column::Status).string().not_null())
                    .col(ColumnDef::new(deposit::Column::IncomeStartDate).big_integer())
                    .col(ColumnDef::new(deposit::Column::IncomeEndDate).big_integer())
                    .col(ColumnDef::new(deposit::Column::DailyIncomeAmount).decimal())
                    .col(
                        ColumnDef::new(deposit::Column::TotalIncomeEarned)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(deposit::Column::IsIncomeActive)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(deposit::Column::LastAccruedDate).big_integer())
                    .col(
                        ColumnDef::new(deposit::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(deposit::Column::ProcessedAt).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deposit_income_active")
                    .table(deposit::Entity)
                    .col(deposit::Column::IsIncomeActive)
                    .col(deposit::Column::IncomeEndDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(deposit::Entity).to_owned())
            .await
    }
}
