use crate::dto::{
    CreateWithdrawalRequest, ResponseData, WithdrawalDetails, RESPONSE_BAD_REQUEST,
    RESPONSE_CONFLICT, RESPONSE_CREATED, RESPONSE_INTERNAL_ERROR, RESPONSE_NOT_FOUND,
    RESPONSE_OK, WITHDRAWAL_COMPLETED, WITHDRAWAL_PROCESSING, WITHDRAWAL_REJECTED,
};
use crate::pool::Db;
use rocket::serde::json::Json;
use sea_orm::{
    prelude::Decimal, sea_query::Expr, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    TransactionTrait,
};
use sea_orm_rocket::Connection;
use stakehub_db_entity::db::user_account::{Column as UserColumn, Entity as UserAccount};
use stakehub_db_entity::db::withdrawal::{
    Column as WithdrawalColumn, Entity as Withdrawal, Model as WithdrawalModel,
};
use tracing::{info, warn};
use uuid::Uuid;

#[post("/create_withdrawal", format = "application/json", data = "<request>")]
pub async fn create(
    conn: Connection<'_, Db>,
    request: Json<CreateWithdrawalRequest>,
) -> Json<ResponseData<WithdrawalDetails>> {
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

    let user = match UserAccount::find_by_id(request.user_id.to_owned()).one(db).await {
        Ok(Some(user)) => user,
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
    };

    // advisory only; the wallet is debited at approval time
    if amount > user.wallet_balance {
        return Json(ResponseData::new(
            RESPONSE_BAD_REQUEST,
            "Insufficient wallet balance.".to_owned(),
            None,
        ));
    }

    let withdrawal = WithdrawalModel {
        id: Uuid::new_v4().to_string(),
        user_id: request.user_id.to_owned(),
        amount,
        wallet_address: request.wallet_address.to_owned(),
        status: WITHDRAWAL_PROCESSING.to_owned(),
        created_at: chrono::Utc::now().timestamp(),
        processed_at: None,
    };
    match Withdrawal::insert(withdrawal.clone().into_active_model()).exec(db).await {
        Ok(_) => {
            info!("Withdrawal {} requested by {}", withdrawal.id, withdrawal.user_id);
            Json(ResponseData::new(
                RESPONSE_CREATED,
                "Withdrawal requested.".to_owned(),
                Some(WithdrawalDetails::new(&withdrawal)),
            ))
        }
        Err(error) => {
            warn!("Error inserting withdrawal: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Could not insert withdrawal.".to_owned(),
                None,
            ))
        }
    }
}

#[get("/approve_withdrawal?<id>", format = "application/json")]
pub async fn approve(
    conn: Connection<'_, Db>,
    id: String,
) -> Json<ResponseData<WithdrawalDetails>> {
    let db = conn.into_inner();
    let now = chrono::Utc::now().timestamp();

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

    let withdrawal = match Withdrawal::find_by_id(id.to_owned()).one(&txn).await {
        Ok(Some(withdrawal)) => withdrawal,
        Ok(None) => {
            return Json(ResponseData::new(
                RESPONSE_NOT_FOUND,
                format!("Withdrawal not found: {}", id),
                None,
            ));
        }
        Err(error) => {
            warn!("Error fetching withdrawal: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error fetching withdrawal.".to_owned(),
                None,
            ));
        }
    };

    // claim the record before touching the wallet
    let claim = Withdrawal::update_many()
        .col_expr(WithdrawalColumn::Status, Expr::value(WITHDRAWAL_COMPLETED))
        .col_expr(WithdrawalColumn::ProcessedAt, Expr::value(now))
        .filter(WithdrawalColumn::Id.eq(id.to_owned()))
        .filter(WithdrawalColumn::Status.eq(WITHDRAWAL_PROCESSING))
        .exec(&txn)
        .await;
    match claim {
        Ok(result) if result.rows_affected == 1 => {}
        Ok(_) => {
            return Json(ResponseData::new(
                RESPONSE_CONFLICT,
                format!("Withdrawal is not processing: {}", id),
                None,
            ));
        }
        Err(error) => {
            warn!("Error claiming withdrawal: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error updating withdrawal.".to_owned(),
                None,
            ));
        }
    }

    let debit = UserAccount::update_many()
        .col_expr(
            UserColumn::WalletBalance,
            Expr::col(UserColumn::WalletBalance).sub(withdrawal.amount),
        )
        .col_expr(
            UserColumn::SellCount,
            Expr::col(UserColumn::SellCount).add(1),
        )
        .filter(UserColumn::Id.eq(withdrawal.user_id.to_owned()))
        .filter(UserColumn::WalletBalance.gte(withdrawal.amount))
        .exec(&txn)
        .await;
    match debit {
        Ok(result) if result.rows_affected == 1 => {}
        Ok(_) => {
            // rollback keeps the withdrawal in processing
            return Json(ResponseData::new(
                RESPONSE_BAD_REQUEST,
                "Insufficient wallet balance.".to_owned(),
                None,
            ));
        }
        Err(error) => {
            warn!("Error debiting wallet: {:?}", error);
            return Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error debiting wallet.".to_owned(),
                None,
            ));
        }
    }

    if let Err(error) = txn.commit().await {
        warn!("Error committing withdrawal approval: {:?}", error);
        return Json(ResponseData::new(
            RESPONSE_INTERNAL_ERROR,
            "Could not commit withdrawal approval.".to_owned(),
            None,
        ));
    }

    info!("Withdrawal {} approved", id);
    let approved = WithdrawalModel {
        status: WITHDRAWAL_COMPLETED.to_owned(),
        processed_at: Some(now),
        ..withdrawal
    };
    Json(ResponseData::new(
        RESPONSE_OK,
        "Withdrawal approved.".to_owned(),
        Some(WithdrawalDetails::new(&approved)),
    ))
}

#[get("/reject_withdrawal?<id>", format = "application/json")]
pub async fn reject(conn: Connection<'_, Db>, id: String) -> Json<ResponseData<String>> {
    let db = conn.into_inner();
    let now = chrono::Utc::now().timestamp();

    let result = Withdrawal::update_many()
        .col_expr(WithdrawalColumn::Status, Expr::value(WITHDRAWAL_REJECTED))
        .col_expr(WithdrawalColumn::ProcessedAt, Expr::value(now))
        .filter(WithdrawalColumn::Id.eq(id.to_owned()))
        .filter(WithdrawalColumn::Status.eq(WITHDRAWAL_PROCESSING))
        .exec(db)
        .await;
    match result {
        Ok(result) if result.rows_affected == 1 => {
            info!("Withdrawal {} rejected", id);
            Json(ResponseData::new(
                RESPONSE_OK,
                "Withdrawal rejected.".to_owned(),
                Some(id),
            ))
        }
        Ok(_) => Json(ResponseData::new(
            RESPONSE_CONFLICT,
            format!("Withdrawal is not processing: {}", id),
            None,
        )),
        Err(error) => {
            warn!("Error rejecting withdrawal: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Error rejecting withdrawal.".to_owned(),
                None,
            ))
        }
    }
}
