use sea_orm_migration::prelude::*;
use stakehub_db_entity::db::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000003_create_referral_code"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(referral_code::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(referral_code::Column::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(referral_code::Column::UserId).string().not_null())
                    .col(
                        ColumnDef::new(referral_code::Column::Percentage)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_code::Column::IsActive)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_code::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(referral_code::Entity).to_owned())
            .await
    }
}
