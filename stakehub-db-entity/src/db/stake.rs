use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stake", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub product_title: String,
    pub stake_amount: Decimal,
    pub income_percentage: Decimal,
    pub profit_amount: Decimal,
    pub handling_fee: Decimal,
    pub duration_days: i32,
    pub maturity_date: i64,
    pub status: String,
    pub attachment_path: Option<String>,
    pub referred_by: Option<String>,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_account::Entity",
        from = "Column::UserId",
        to = "super::user_account::Column::Id"
    )]
    UserAccount,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(has_many = "super::stake_return::Entity")]
    StakeReturn,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccount.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::stake_return::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StakeReturn.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
