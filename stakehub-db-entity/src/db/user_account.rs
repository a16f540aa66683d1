use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_account", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub referral_code: Option<String>,
    pub referred_by: Option<String>,
    pub available_balance: Decimal,
    pub wallet_balance: Decimal,
    pub total_staked: Decimal,
    pub total_earnings: Decimal,
    pub todays_earning: Decimal,
    pub sell_count: i64,
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
