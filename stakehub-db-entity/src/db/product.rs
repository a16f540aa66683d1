use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub status: String,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub income_percentage: Decimal,
    pub handling_fee: Decimal,
    pub duration_days: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stake::Entity")]
    Stake,
}

impl Related<super::stake::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stake.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
