use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000007_create_withdrawal"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(withdrawal::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(withdrawal::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(withdrawal::Column::UserId).string().not_null())
                    .col(ColumnDef::new(withdrawal::Column::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(withdrawal::Column::WalletAddress)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(withdrawal::Column::Status).string().not_null())
                    .col(
                        ColumnDef::new(withdrawal::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(withdrawal::Column::ProcessedAt).big_integer())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(withdrawal::Entity).to_owned())
            .await
    }
}
