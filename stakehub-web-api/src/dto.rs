use rocket::serde::{Deserialize, Serialize};
use sea_orm::prelude::Decimal;
use sea_orm::QueryResult;
use stakehub_db_entity::db::deposit::Model as DepositModel;
use stakehub_db_entity::db::product::Model as ProductModel;
use stakehub_db_entity::db::stake::Model as StakeModel;
use stakehub_db_entity::db::withdrawal::Model as WithdrawalModel;
use strum_macros::Display;

pub const RESPONSE_OK: u16 = 200;
pub const RESPONSE_CREATED: u16 = 201;
pub const RESPONSE_BAD_REQUEST: u16 = 400;
pub const RESPONSE_NOT_FOUND: u16 = 404;
pub const RESPONSE_CONFLICT: u16 = 409;
pub const RESPONSE_INTERNAL_ERROR: u16 = 500;

pub const PRODUCT_ACTIVE: &str = "active";

pub const STAKE_ACTIVE: &str = "active";
pub const STAKE_COMPLETED: &str = "completed";

pub const RETURN_PENDING: &str = "pending";
pub const RETURN_COMPLETED: &str = "completed";

pub const DEPOSIT_PENDING: &str = "pending";
pub const DEPOSIT_APPROVED: &str = "approved";
pub const DEPOSIT_REJECTED: &str = "rejected";

pub const WITHDRAWAL_PROCESSING: &str = "processing";
pub const WITHDRAWAL_COMPLETED: &str = "completed";
pub const WITHDRAWAL_REJECTED: &str = "rejected";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResponseData<T> {
    pub code: Option<u16>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ResponseData<T> {
    pub fn new(code: u16, message: String, data: Option<T>) -> ResponseData<T> {
        ResponseData {
            code: Some(code),
            status_code: None,
            message,
            data,
        }
    }
}

#[derive(Clone, Debug, PartialEq, FromFormField, Deserialize, Serialize, Display)]
#[serde(crate = "rocket::serde")]
#[strum(serialize_all = "snake_case")]
pub enum StakeStatusFilter {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "completed")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateStakeRequest {
    pub user_id: String,
    pub product_id: String,
    pub amount: String,
    pub referred_by: Option<String>,
    pub attachment_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateDepositRequest {
    pub user_id: String,
    pub network_type: String,
    pub amount: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateWithdrawalRequest {
    pub user_id: String,
    pub amount: String,
    pub wallet_address: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ProductDetails {
    pub id: String,
    pub title: String,
    pub status: String,
    pub min_amount: String,
    pub max_amount: String,
    pub income_percentage: String,
    pub handling_fee: String,
    pub duration_days: i32,
}

impl ProductDetails {
    pub fn new(product: &ProductModel) -> ProductDetails {
        ProductDetails {
            id: product.id.to_owned(),
            title: product.title.to_owned(),
            status: product.status.to_owned(),
            min_amount: product.min_amount.to_string(),
            max_amount: product.max_amount.to_string(),
            income_percentage: product.income_percentage.to_string(),
            handling_fee: product.handling_fee.to_string(),
            duration_days: product.duration_days,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StakeDetails {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub product_title: String,
    pub stake_amount: String,
    pub income_percentage: String,
    pub profit_amount: String,
    pub handling_fee: String,
    pub duration_days: i32,
    pub maturity_date: i64,
    pub status: String,
    pub attachment_path: Option<String>,
    pub referred_by: Option<String>,
    pub created_at: i64,
    pub completed_at: Option<i64>,
    pub product: Option<ProductDetails>,
}

impl StakeDetails {
    pub fn new(stake: &StakeModel, product: Option<&ProductModel>) -> StakeDetails {
        StakeDetails {
            id: stake.id.to_owned(),
            user_id: stake.user_id.to_owned(),
            product_id: stake.product_id.to_owned(),
            product_title: stake.product_title.to_owned(),
            stake_amount: stake.stake_amount.to_string(),
            income_percentage: stake.income_percentage.to_string(),
            profit_amount: stake.profit_amount.to_string(),
            handling_fee: stake.handling_fee.to_string(),
            duration_days: stake.duration_days,
            maturity_date: stake.maturity_date,
            status: stake.status.to_owned(),
            attachment_path: stake.attachment_path.to_owned(),
            referred_by: stake.referred_by.to_owned(),
            created_at: stake.created_at,
            completed_at: stake.completed_at,
            product: product.map(ProductDetails::new),
        }
    }
}

/// Row shape of the `ALL_STAKES` join in `sql_stmt.rs`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AdminStakeDetails {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub product_id: String,
    pub product_title: String,
    pub stake_amount: String,
    pub income_percentage: String,
    pub profit_amount: String,
    pub handling_fee: String,
    pub duration_days: i32,
    pub maturity_date: i64,
    pub status: String,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

impl AdminStakeDetails {
    pub fn new(row: &QueryResult) -> AdminStakeDetails {
        AdminStakeDetails {
            id: row.try_get("", "id").unwrap_or_default(),
            user_id: row.try_get("", "user_id").unwrap_or_default(),
            user_name: row.try_get("", "user_name").unwrap_or_default(),
            user_email: row.try_get("", "user_email").unwrap_or_default(),
            product_id: row.try_get("", "product_id").unwrap_or_default(),
            product_title: row.try_get("", "product_title").unwrap_or_default(),
            stake_amount: row
                .try_get::<Decimal>("", "stake_amount")
                .unwrap_or(Decimal::ZERO)
                .to_string(),
            income_percentage: row
                .try_get::<Decimal>("", "income_percentage")
                .unwrap_or(Decimal::ZERO)
                .to_string(),
            profit_amount: row
                .try_get::<Decimal>("", "profit_amount")
                .unwrap_or(Decimal::ZERO)
                .to_string(),
            handling_fee: row
                .try_get::<Decimal>("", "handling_fee")
                .unwrap_or(Decimal::ZERO)
                .to_string(),
            duration_days: row.try_get("", "duration_days").unwrap_or_default(),
            maturity_date: row.try_get("", "maturity_date").unwrap_or_default(),
            status: row.try_get("", "status").unwrap_or_default(),
            created_at: row.try_get("", "created_at").unwrap_or_default(),
            completed_at: row.try_get("", "completed_at").unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DepositDetails {
    pub id: String,
    pub user_id: String,
    pub network_type: String,
    pub amount: String,
    pub status: String,
    pub income_start_date: Option<i64>,
    pub income_end_date: Option<i64>,
    pub daily_income_amount: Option<String>,
    pub total_income_earned: String,
    pub is_income_active: bool,
    pub created_at: i64,
}

impl DepositDetails {
    pub fn new(deposit: &DepositModel) -> DepositDetails {
        DepositDetails {
            id: deposit.id.to_owned(),
            user_id: deposit.user_id.to_owned(),
            network_type: deposit.network_type.to_owned(),
            amount: deposit.amount.to_string(),
            status: deposit.status.to_owned(),
            income_start_date: deposit.income_start_date,
            income_end_date: deposit.income_end_date,
            daily_income_amount: deposit.daily_income_amount.map(|d| d.to_string()),
            total_income_earned: deposit.total_income_earned.to_string(),
            is_income_active: deposit.is_income_active,
            created_at: deposit.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct WithdrawalDetails {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub wallet_address: String,
    pub status: String,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

impl WithdrawalDetails {
    pub fn new(withdrawal: &WithdrawalModel) -> WithdrawalDetails {
        WithdrawalDetails {
            id: withdrawal.id.to_owned(),
            user_id: withdrawal.user_id.to_owned(),
            amount: withdrawal.amount.to_string(),
            wallet_address: withdrawal.wallet_address.to_owned(),
            status: withdrawal.status.to_owned(),
            created_at: withdrawal.created_at,
            processed_at: withdrawal.processed_at,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SweepSummary {
    pub processed: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DailyIncomeSummary {
    pub deposits_processed: u64,
    pub deposits_deactivated: u64,
    pub total_credited: String,
}
