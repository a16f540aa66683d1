use sea_orm::entity::prelude::*;

/// Accrual fields are null until the deposit is approved; `last_accrued_date`
/// advances in whole days as the daily income sweep credits the user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "deposit", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub network_type: String,
    pub amount: Decimal,
    pub status: String,
    pub income_start_date: Option<i64>,
    pub income_end_date: Option<i64>,
    pub daily_income_amount: Option<Decimal>,
    pub total_income_earned: Decimal,
    pub is_income_active: bool,
    pub last_accrued_date: Option<i64>,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_account::Entity",
        from = "Column::UserId",
        to = "super::user_account::Column::Id"
    )]
    UserAccount,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
