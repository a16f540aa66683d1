use crate::dto::{
    AdminStakeDetails, CreateStakeRequest, ResponseData, StakeDetails, StakeStatusFilter,
    PRODUCT_ACTIVE, RESPONSE_BAD_REQUEST, RESPONSE_CONFLICT, RESPONSE_CREATED,
    RESPONSE_INTERNAL_ERROR, RESPONSE_NOT_FOUND, RESPONSE_OK, RETURN_PENDING, STAKE_ACTIVE,
};
use crate::fin_cal;
use crate::pool::Db;
use crate::sql_stmt::{ALL_STAKES, ALL_STAKES_BY_STATUS, DB_BACKEND};
use rocket::serde::json::Json;
use sea_orm::{
    prelude::Decimal, sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Statement, TransactionTrait,
};
use sea_orm_rocket::Connection;
use stakehub_db_entity::db::product::{Entity as Product, Model as ProductModel};
use stakehub_db_entity::db::referral_code::{
    Column as ReferralCodeColumn, Entity as ReferralCode,
};
use stakehub_db_entity::db::stake::{
    Column as StakeColumn, Entity as Stake, Model as StakeModel,
};
use stakehub_db_entity::db::stake_return::{Entity as StakeReturn, Model as StakeReturnModel};
use stakehub_db_entity::db::user_account::{Column as UserColumn, Entity as UserAccount};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug)]
enum CreateStakeError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

#[post("/create_stake", format = "application/json", data = "<request>")]
pub async fn create(
    conn: Connection<'_, Db>,
    request: Json<CreateStakeRequest>,
) -> Json<ResponseData<StakeDetails>> {
    let db = conn.into_inner();
    let request = request.into_inner();

    match create_stake_record(db, &request).await {
        Ok((stake, product)) => {
            info!("Stake {} created for user {}", stake.id, stake.user_id);
            Json(ResponseData::new(
                RESPONSE_CREATED,
                "Stake created.".to_owned(),
                Some(StakeDetails::new(&stake, Some(&product))),
            ))
        }
        Err(CreateStakeError::Validation(message)) => {
            Json(ResponseData::new(RESPONSE_BAD_REQUEST, message, None))
        }
        Err(CreateStakeError::NotFound(message)) => {
            Json(ResponseData::new(RESPONSE_NOT_FOUND, message, None))
        }
        Err(CreateStakeError::Conflict(message)) => {
            Json(ResponseData::new(RESPONSE_CONFLICT, message, None))
        }
        Err(CreateStakeError::Internal(message)) => {
            Json(ResponseData::new(RESPONSE_INTERNAL_ERROR, message, None))
        }
    }
}

/// Validation ladder, first match wins: amount, product missing, product
/// inactive, amount range, user missing, referral code, insufficient funds.
/// No write happens before every check has passed.
async fn create_stake_record(
    db: &DatabaseConnection,
    request: &CreateStakeRequest,
) -> Result<(StakeModel, ProductModel), CreateStakeError> {
    let amount = match Decimal::from_str_radix(&request.amount, 10) {
        Ok(amount) if amount > Decimal::ZERO => amount,
        _ => {
            return Err(CreateStakeError::Validation(
                "'amount' must be a positive number.".to_owned(),
            ));
        }
    };

    let product = match Product::find_by_id(request.product_id.to_owned()).one(db).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            warn!("Product not found: {}", request.product_id);
            return Err(CreateStakeError::NotFound(format!(
                "Product not found: {}",
                request.product_id
            )));
        }
        Err(error) => {
            warn!("Error fetching product: {:?}", error);
            return Err(CreateStakeError::Internal(
                "Error fetching product.".to_owned(),
            ));
        }
    };

    if product.status != PRODUCT_ACTIVE {
        return Err(CreateStakeError::Validation(format!(
            "Product '{}' is not active.",
            product.title
        )));
    }

    if amount < product.min_amount || amount > product.max_amount {
        return Err(CreateStakeError::Validation(format!(
            "Amount must be between {} and {}.",
            product.min_amount, product.max_amount
        )));
    }

    match UserAccount::find_by_id(request.user_id.to_owned()).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("User not found: {}", request.user_id);
            return Err(CreateStakeError::NotFound(format!(
                "User not found: {}",
                request.user_id
            )));
        }
        Err(error) => {
            warn!("Error fetching user: {:?}", error);
            return Err(CreateStakeError::Internal("Error fetching user.".to_owned()));
        }
    }

    if let Some(ref code) = request.referred_by {
        let referral = ReferralCode::find_by_id(code.to_owned())
            .filter(ReferralCodeColumn::IsActive.eq(true))
            .one(db)
            .await;
        match referral {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(CreateStakeError::Validation(format!(
                    "Unknown referral code: {}",
                    code
                )));
            }
            Err(error) => {
                warn!("Error fetching referral code: {:?}", error);
                return Err(CreateStakeError::Internal(
                    "Error fetching referral code.".to_owned(),
                ));
            }
        }
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(error) => {
            warn!("Could not open transaction: {:?}", error);
            return Err(CreateStakeError::Internal(
                "System error. Please try again.".to_owned(),
            ));
        }
    };

    // the balance guard lives in the UPDATE itself, so two concurrent
    // requests can never both pass a stale pre-check
    let debit = UserAccount::update_many()
        .col_expr(
            UserColumn::AvailableBalance,
            Expr::col(UserColumn::AvailableBalance).sub(amount),
        )
        .col_expr(
            UserColumn::TotalStaked,
            Expr::col(UserColumn::TotalStaked).add(amount),
        )
        .filter(UserColumn::Id.eq(request.user_id.to_owned()))
        .filter(UserColumn::AvailableBalance.gte(amount))
        .exec(&txn)
        .await;
    match debit {
        Ok(result) if result.rows_affected == 1 => {}
        Ok(_) => {
            return Err(CreateStakeError::Validation(
                "Insufficient available balance.".to_owned(),
            ));
        }
        Err(error) => {
            warn!("Error debiting balance: {:?}", error);
            return Err(CreateStakeError::Internal(
                "Error debiting balance.".to_owned(),
            ));
        }
    }

    let now = chrono::Utc::now().timestamp();
    let duration_days = fin_cal::normalize_duration_days(product.duration_days);
    let profit_amount = fin_cal::profit_amount(amount, product.income_percentage);
    let maturity_date = fin_cal::maturity_timestamp(now, duration_days);

    let stake = StakeModel {
        id: Uuid::new_v4().to_string(),
        user_id: request.user_id.to_owned(),
        product_id: product.id.to_owned(),
        product_title: product.title.to_owned(),
        stake_amount: amount,
        income_percentage: product.income_percentage,
        profit_amount,
        handling_fee: product.handling_fee,
        duration_days,
        maturity_date,
        status: STAKE_ACTIVE.to_owned(),
        attachment_path: request.attachment_path.to_owned(),
        referred_by: request.referred_by.to_owned(),
        created_at: now,
        completed_at: None,
    };
    let stake_return = StakeReturnModel {
        id: Uuid::new_v4().to_string(),
        stake_id: stake.id.to_owned(),
        user_id: request.user_id.to_owned(),
        original_amount: amount,
        profit_amount,
        handling_fee: product.handling_fee,
        total_return_amount: fin_cal::total_return_amount(
            amount,
            profit_amount,
            product.handling_fee,
        ),
        maturity_date,
        status: RETURN_PENDING.to_owned(),
        processed_at: None,
        created_at: now,
    };

    if let Err(error) = Stake::insert(stake.clone().into_active_model()).exec(&txn).await {
        warn!("Error inserting stake: {:?}", error);
        if error.to_string().contains("duplicate key") {
            return Err(CreateStakeError::Conflict(
                "Could not insert stake.".to_owned(),
            ));
        }
        return Err(CreateStakeError::Internal(
            "Could not insert stake.".to_owned(),
        ));
    }
    if let Err(error) = StakeReturn::insert(stake_return.into_active_model())
        .exec(&txn)
        .await
    {
        warn!("Error inserting stake_return: {:?}", error);
        return Err(CreateStakeError::Internal(
            "Could not insert stake return.".to_owned(),
        ));
    }

    if let Err(error) = txn.commit().await {
        warn!("Error committing stake creation: {:?}", error);
        return Err(CreateStakeError::Internal(
            "Could not commit stake creation.".to_owned(),
        ));
    }

    Ok((stake, product))
}

#[get("/user_stakes?<user_id>", format = "application/json")]
pub async fn user_stakes(
    conn: Connection<'_, Db>,
    user_id: String,
) -> Json<ResponseData<Vec<StakeDetails>>> {
    let db = conn.into_inner();
    let stakes = Stake::find()
        .filter(StakeColumn::UserId.eq(user_id.to_owned()))
        .find_also_related(Product)
        .order_by_desc(StakeColumn::CreatedAt)
        .all(db)
        .await;

    match stakes {
        Ok(stakes) => {
            let details: Vec<StakeDetails> = stakes
                .iter()
                .map(|(stake, product)| StakeDetails::new(stake, product.as_ref()))
                .collect();
            let message = if details.is_empty() {
                format!("No stakes found for user: {}.", user_id)
            } else {
                "".to_owned()
            };
            Json(ResponseData::new(RESPONSE_OK, message, Some(details)))
        }
        Err(error) => {
            warn!("Error fetching stakes for {}: {:?}", user_id, error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error fetching user stakes.".to_owned(),
                None,
            ))
        }
    }
}

#[get("/all_stakes?<status>", format = "application/json")]
pub async fn all_stakes(
    conn: Connection<'_, Db>,
    status: Option<StakeStatusFilter>,
) -> Json<ResponseData<Vec<AdminStakeDetails>>> {
    let db = conn.into_inner();
    let statement = match status {
        Some(status) => Statement::from_sql_and_values(
            DB_BACKEND,
            ALL_STAKES_BY_STATUS,
            vec![status.to_string().into()],
        ),
        None => Statement::from_sql_and_values(DB_BACKEND, ALL_STAKES, vec![]),
    };

    match db.query_all(statement).await {
        Ok(rows) => {
            let details: Vec<AdminStakeDetails> =
                rows.iter().map(AdminStakeDetails::new).collect();
            Json(ResponseData::new(RESPONSE_OK, "".to_owned(), Some(details)))
        }
        Err(error) => {
            warn!("Error fetching all stakes: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error fetching stakes.".to_owned(),
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use stakehub_db_entity::db::user_account::Model as UserModel;

    fn active_product() -> ProductModel {
        ProductModel {
            id: "prod-1".to_owned(),
            title: "Fixed 7d".to_owned(),
            status: PRODUCT_ACTIVE.to_owned(),
            min_amount: Decimal::from(10),
            max_amount: Decimal::from(1_000),
            income_percentage: Decimal::from(5),
            handling_fee: Decimal::from(2),
            duration_days: 7,
            created_at: 1_700_000_000,
        }
    }

    fn user_with_balance(available: Decimal) -> UserModel {
        UserModel {
            id: "user-1".to_owned(),
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            referral_code: None,
            referred_by: None,
            available_balance: available,
            wallet_balance: Decimal::ZERO,
            total_staked: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
            todays_earning: Decimal::ZERO,
            sell_count: 0,
            created_at: 1_700_000_000,
        }
    }

    fn request(amount: &str, referred_by: Option<&str>) -> CreateStakeRequest {
        CreateStakeRequest {
            user_id: "user-1".to_owned(),
            product_id: "prod-1".to_owned(),
            amount: amount.to_owned(),
            referred_by: referred_by.map(|c| c.to_owned()),
            attachment_path: None,
        }
    }

    #[tokio::test]
    async fn amount_outside_price_range_is_rejected_before_writes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active_product()]])
            .into_connection();

        let result = create_stake_record(&db, &request("5000", None)).await;
        assert!(matches!(result, Err(CreateStakeError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_user_is_reported_before_bad_referral_code() {
        // no user row; the unknown referral code must not win
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active_product()]])
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let result = create_stake_record(&db, &request("100", Some("ghost"))).await;
        assert!(matches!(result, Err(CreateStakeError::NotFound(_))));
    }

    #[tokio::test]
    async fn insufficient_balance_is_rejected_with_no_stake_written() {
        // the guarded debit matches zero rows for a user with 50 available
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active_product()]])
            .append_query_results(vec![vec![user_with_balance(Decimal::from(50))]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = create_stake_record(&db, &request("100", None)).await;
        match result {
            Err(CreateStakeError::Validation(message)) => {
                assert_eq!(message, "Insufficient available balance.");
            }
            other => panic!("Expected insufficient balance rejection, got {:?}", other),
        }
    }
}
