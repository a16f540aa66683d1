use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000002_create_product"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(product::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(product::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(product::Column::Title).string().not_null())
                    .col(ColumnDef::new(product::Column::Status).string().not_null())
                    .col(ColumnDef::new(product::Column::MinAmount).decimal().not_null())
                    .col(ColumnDef::new(product::Column::MaxAmount).decimal().not_null())
                    .col(
                        ColumnDef::new(product::Column::IncomePercentage)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(product::Column::HandlingFee)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(product::Column::DurationDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(product::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(product::Entity).to_owned())
            .await
    }
}
