use sea_orm::entity::prelude::*;

/// Settlement record for one stake. The maturity sweep operates on these
/// rows, never on the stake directly.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stake_return", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub stake_id: String,
    pub user_id: String,
    pub original_amount: Decimal,
    pub profit_amount: Decimal,
    pub handling_fee: Decimal,
    pub total_return_amount: Decimal,
    pub maturity_date: i64,
    pub status: String,
    pub processed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stake::Entity",
        from = "Column::StakeId",
        to = "super::stake::Column::Id"
    )]
    Stake,
    #[sea_orm(
        belongs_to = "super::user_account::Entity",
        from = "Column::UserId",
        to = "super::user_account::Column::Id"
    )]
    UserAccount,
}

impl Related<super::stake::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stake.def()
    }
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
