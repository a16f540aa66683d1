use crate::dto::{
    CreateDepositRequest, DepositDetails, ResponseData, DEPOSIT_APPROVED, DEPOSIT_PENDING,
    DEPOSIT_REJECTED, RESPONSE_BAD_REQUEST, RESPONSE_CONFLICT, RESPONSE_CREATED,
    RESPONSE_INTERNAL_ERROR, RESPONSE_NOT_FOUND, RESPONSE_OK,
};
use crate::fin_cal;
use crate::pool::Db;
use rocket::serde::json::Json;
use sea_orm::{
    prelude::Decimal, sea_query::Expr, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    TransactionTrait,
};
use sea_orm_rocket::Connection;
use stakehub_db_entity::db::deposit::{
    Column as DepositColumn, Entity as Deposit, Model as DepositModel,
};
use stakehub_db_entity::db::user_account::{Column as UserColumn, Entity as UserAccount};
use tracing::{info, warn};
use uuid::Uuid;

#[post("/create_deposit", format = "application/json", data = "<request>")]
pub async fn create(
    conn: Connection<'_, Db>,
    request: Json<CreateDepositRequest>,
) -> Json<ResponseData<DepositDetails>> {
    let db = conn.into_inner();
    let request = request.into_inner();

    let amount = match Decimal::from_str_radix(&request.amount, 10) {
        Ok(amount) if amount > Decimal::ZERO => amount,
        _ => {
            return Json(ResponseData::new(
                RESPONSE_BAD_REQUEST,
                "'amount' must be a positive number.".to_owned(),
                None,
            ));
        }
    };

    match UserAccount::find_by_id(request.user_id.to_owned()).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("User not found: {}", request.user_id);
            return Json(ResponseData::new(
                RESPONSE_NOT_FOUND,
                format!("User not found: {}", request.user_id),
                None,
            ));
        }
        Err(error) => {
            warn!("Error fetching user: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error fetching user.".to_owned(),
                None,
            ));
        }
    }

    let deposit = DepositModel {
        id: Uuid::new_v4().to_string(),
        user_id: request.user_id.to_owned(),
        network_type: request.network_type.to_owned(),
        amount,
        status: DEPOSIT_PENDING.to_owned(),
        income_start_date: None,
        income_end_date: None,
        daily_income_amount: None,
        total_income_earned: Decimal::ZERO,
        is_income_active: false,
        last_accrued_date: None,
        created_at: chrono::Utc::now().timestamp(),
        processed_at: None,
    };
    match Deposit::insert(deposit.clone().into_active_model()).exec(db).await {
        Ok(_) => {
            info!("Deposit {} created for user {}", deposit.id, deposit.user_id);
            Json(ResponseData::new(
                RESPONSE_CREATED,
                "Deposit created.".to_owned(),
                Some(DepositDetails::new(&deposit)),
            ))
        }
        Err(error) => {
            warn!("Error inserting deposit: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Could not insert deposit.".to_owned(),
                None,
            ))
        }
    }
}

/// Approval credits the deposited amount to the available balance and arms
/// the daily income window.
#[get(
    "/approve_deposit?<id>&<daily_income_amount>&<income_duration_days>",
    format = "application/json"
)]
pub async fn approve(
    conn: Connection<'_, Db>,
    id: String,
    daily_income_amount: String,
    income_duration_days: i32,
) -> Json<ResponseData<DepositDetails>> {
    let db = conn.into_inner();
    let now = chrono::Utc::now().timestamp();

    let daily_income_amount = match Decimal::from_str_radix(&daily_income_amount, 10) {
        Ok(amount) if amount >= Decimal::ZERO => amount,
        _ => {
            return Json(ResponseData::new(
                RESPONSE_BAD_REQUEST,
                "'daily_income_amount' must be a non-negative number.".to_owned(),
                None,
            ));
        }
    };
    if income_duration_days <= 0 {
        return Json(ResponseData::new(
            RESPONSE_BAD_REQUEST,
            "'income_duration_days' must be positive.".to_owned(),
            None,
        ));
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(error) => {
            warn!("Could not open transaction: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "System error. Please try again.".to_owned(),
                None,
            ));
        }
    };

    let deposit = match Deposit::find_by_id(id.to_owned()).one(&txn).await {
        Ok(Some(deposit)) => deposit,
        Ok(None) => {
            return Json(ResponseData::new(
                RESPONSE_NOT_FOUND,
                format!("Deposit not found: {}", id),
                None,
            ));
        }
        Err(error) => {
            warn!("Error fetching deposit: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error fetching deposit.".to_owned(),
                None,
            ));
        }
    };

    let income_end_date = now + income_duration_days as i64 * fin_cal::SECONDS_PER_DAY;
    let claim = Deposit::update_many()
        .col_expr(DepositColumn::Status, Expr::value(DEPOSIT_APPROVED))
        .col_expr(DepositColumn::ProcessedAt, Expr::value(now))
        .col_expr(DepositColumn::IncomeStartDate, Expr::value(now))
        .col_expr(DepositColumn::IncomeEndDate, Expr::value(income_end_date))
        .col_expr(
            DepositColumn::DailyIncomeAmount,
            Expr::value(daily_income_amount),
        )
        .col_expr(DepositColumn::LastAccruedDate, Expr::value(now))
        .col_expr(DepositColumn::IsIncomeActive, Expr::value(true))
        .filter(DepositColumn::Id.eq(id.to_owned()))
        .filter(DepositColumn::Status.eq(DEPOSIT_PENDING))
        .exec(&txn)
        .await;
    match claim {
        Ok(result) if result.rows_affected == 1 => {}
        Ok(_) => {
            return Json(ResponseData::new(
                RESPONSE_CONFLICT,
                format!("Deposit is not pending: {}", id),
                None,
            ));
        }
        Err(error) => {
            warn!("Error approving deposit: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error approving deposit.".to_owned(),
                None,
            ));
        }
    }

    let credit = UserAccount::update_many()
        .col_expr(
            UserColumn::AvailableBalance,
            Expr::col(UserColumn::AvailableBalance).add(deposit.amount),
        )
        .filter(UserColumn::Id.eq(deposit.user_id.to_owned()))
        .exec(&txn)
        .await;
    match credit {
        Ok(result) if result.rows_affected == 1 => {}
        Ok(_) => {
            warn!("User {} missing for deposit {}", deposit.user_id, id);
            return Json(ResponseData::new(
                RESPONSE_NOT_FOUND,
                format!("User not found: {}", deposit.user_id),
                None,
            ));
        }
        Err(error) => {
            warn!("Error crediting balance: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error crediting balance.".to_owned(),
                None,
            ));
        }
    }

    if let Err(error) = txn.commit().await {
        warn!("Error committing deposit approval: {:?}", error);
        return Json(ResponseData::new(
            RESPONSE_INTERNAL_ERROR,
            "Could not commit deposit approval.".to_owned(),
            None,
        ));
    }

    info!("Deposit {} approved", id);
    let approved = DepositModel {
        status: DEPOSIT_APPROVED.to_owned(),
        income_start_date: Some(now),
        income_end_date: Some(income_end_date),
        daily_income_amount: Some(daily_income_amount),
        is_income_active: true,
        last_accrued_date: Some(now),
        processed_at: Some(now),
        ..deposit
    };
    Json(ResponseData::new(
        RESPONSE_OK,
        "Deposit approved.".to_owned(),
        Some(DepositDetails::new(&approved)),
    ))
}

#[get("/reject_deposit?<id>", format = "application/json")]
pub async fn reject(conn: Connection<'_, Db>, id: String) -> Json<ResponseData<String>> {
    let db = conn.into_inner();
    let now = chrono::Utc::now().timestamp();

    let result = Deposit::update_many()
        .col_expr(DepositColumn::Status, Expr::value(DEPOSIT_REJECTED))
        .col_expr(DepositColumn::ProcessedAt, Expr::value(now))
        .filter(DepositColumn::Id.eq(id.to_owned()))
        .filter(DepositColumn::Status.eq(DEPOSIT_PENDING))
        .exec(db)
        .await;
    match result {
        Ok(result) if result.rows_affected == 1 => {
            info!("Deposit {} rejected", id);
            Json(ResponseData::new(
                RESPONSE_OK,
                "Deposit rejected.".to_owned(),
                Some(id),
            ))
        }
        Ok(_) => Json(ResponseData::new(
            RESPONSE_CONFLICT,
            format!("Deposit is not pending: {}", id),
            None,
        )),
        Err(error) => {
            warn!("Error rejecting deposit: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error rejecting deposit.".to_owned(),
                None,
            ))
        }
    }
}
