use crate::dto::{
    DailyIncomeSummary, SweepSummary, DEPOSIT_APPROVED, RETURN_COMPLETED, RETURN_PENDING,
    STAKE_ACTIVE, STAKE_COMPLETED,
};
use crate::fin_cal;
use sea_orm::{
    entity::Set as EntitySet, prelude::Decimal, sea_query::Expr, ActiveModelTrait, ColumnTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use stakehub_db_entity::db::deposit::{
    Column as DepositColumn, Entity as Deposit, Model as DepositModel,
};
use stakehub_db_entity::db::stake::{Column as StakeColumn, Entity as Stake};
use stakehub_db_entity::db::stake_return::{
    Column as StakeReturnColumn, Entity as StakeReturn, Model as StakeReturnModel,
};
use stakehub_db_entity::db::user_account::Entity as UserAccount;
use tracing::{info, warn};

pub const DEFAULT_SWEEP_BATCH_SIZE: u64 = 500;

enum Outcome {
    Processed,
    Skipped,
}

/// Settles every pending stake return whose maturity date has passed.
/// Each record runs in its own transaction; one record failing never
/// aborts the batch.
pub async fn process_matured_stakes(
    db: &DatabaseConnection,
    batch_size: u64,
) -> Result<SweepSummary, DbErr> {
    let now = chrono::Utc::now().timestamp();
    let matured = StakeReturn::find()
        .filter(StakeReturnColumn::Status.eq(RETURN_PENDING))
        .filter(StakeReturnColumn::MaturityDate.lte(now))
        .order_by_asc(StakeReturnColumn::MaturityDate)
        .limit(batch_size)
        .all(db)
        .await?;

    let mut summary = SweepSummary {
        processed: 0,
        skipped: 0,
        failed: 0,
    };
    for stake_return in matured {
        match settle_stake_return(db, &stake_return, now).await {
            Ok(Outcome::Processed) => summary.processed += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(error) => {
                warn!(
                    "Could not settle stake_return {}: {:?}",
                    stake_return.id, error
                );
                summary.failed += 1;
            }
        }
    }
    info!(
        "Maturity sweep done: {} processed, {} skipped, {} failed",
        summary.processed, summary.skipped, summary.failed
    );
    Ok(summary)
}

async fn settle_stake_return(
    db: &DatabaseConnection,
    stake_return: &StakeReturnModel,
    now: i64,
) -> Result<Outcome, DbErr> {
    let txn = db.begin().await?;

    if !claim_stake_return(&txn, &stake_return.id, now).await? {
        // another sweep invocation already owns this record
        txn.rollback().await?;
        return Ok(Outcome::Skipped);
    }

    let user = UserAccount::find_by_id(stake_return.user_id.to_owned())
        .lock_exclusive()
        .one(&txn)
        .await?;
    let user = match user {
        Some(user) => user,
        None => {
            // leave the return pending so a later sweep retries it
            warn!(
                "User {} missing for stake_return {}",
                stake_return.user_id, stake_return.id
            );
            txn.rollback().await?;
            return Ok(Outcome::Skipped);
        }
    };

    let net_profit = fin_cal::net_profit(stake_return.profit_amount, stake_return.handling_fee);
    let wallet_balance = user
        .wallet_balance
        .checked_add(net_profit)
        .unwrap_or(user.wallet_balance);
    let available_balance = user
        .available_balance
        .checked_add(stake_return.total_return_amount)
        .unwrap_or(user.available_balance);
    let total_earnings = user
        .total_earnings
        .checked_add(net_profit)
        .unwrap_or(user.total_earnings);
    let todays_earning = user
        .todays_earning
        .checked_add(net_profit)
        .unwrap_or(user.todays_earning);
    let total_staked = fin_cal::clamp_non_negative(
        user.total_staked
            .checked_sub(stake_return.original_amount)
            .unwrap_or(Decimal::ZERO),
    );

    let mut user = user.into_active_model();
    user.wallet_balance = EntitySet(wallet_balance);
    user.available_balance = EntitySet(available_balance);
    user.total_earnings = EntitySet(total_earnings);
    user.todays_earning = EntitySet(todays_earning);
    user.total_staked = EntitySet(total_staked);
    user.update(&txn).await?;

    Stake::update_many()
        .col_expr(StakeColumn::Status, Expr::value(STAKE_COMPLETED))
        .col_expr(StakeColumn::CompletedAt, Expr::value(now))
        .filter(StakeColumn::Id.eq(stake_return.stake_id.to_owned()))
        .filter(StakeColumn::Status.eq(STAKE_ACTIVE))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(Outcome::Processed)
}

/// Compare-and-swap claim; zero rows affected means the record was not
/// pending any more.
async fn claim_stake_return(
    txn: &DatabaseTransaction,
    stake_return_id: &str,
    now: i64,
) -> Result<bool, DbErr> {
    let result = StakeReturn::update_many()
        .col_expr(StakeReturnColumn::Status, Expr::value(RETURN_COMPLETED))
        .col_expr(StakeReturnColumn::ProcessedAt, Expr::value(now))
        .filter(StakeReturnColumn::Id.eq(stake_return_id.to_owned()))
        .filter(StakeReturnColumn::Status.eq(RETURN_PENDING))
        .exec(txn)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Credits whole elapsed days of deposit income. Catch-up after missed runs
/// credits every due day at once; a second run within the same day credits
/// nothing.
pub async fn process_daily_income(db: &DatabaseConnection) -> Result<DailyIncomeSummary, DbErr> {
    let now = chrono::Utc::now().timestamp();
    let active_deposits = Deposit::find()
        .filter(DepositColumn::Status.eq(DEPOSIT_APPROVED))
        .filter(DepositColumn::IsIncomeActive.eq(true))
        .filter(DepositColumn::IncomeStartDate.lte(now))
        .all(db)
        .await?;

    let mut summary = DailyIncomeSummary {
        deposits_processed: 0,
        deposits_deactivated: 0,
        total_credited: Decimal::ZERO.to_string(),
    };
    let mut total_credited = Decimal::ZERO;
    for deposit in active_deposits {
        match accrue_deposit_income(db, &deposit, now).await {
            Ok((credited, deactivated)) => {
                if credited > Decimal::ZERO {
                    summary.deposits_processed += 1;
                    total_credited = total_credited.checked_add(credited).unwrap_or(total_credited);
                }
                if deactivated {
                    summary.deposits_deactivated += 1;
                }
            }
            Err(error) => {
                warn!("Could not accrue income for deposit {}: {:?}", deposit.id, error);
            }
        }
    }
    summary.total_credited = total_credited.to_string();
    info!(
        "Daily income sweep done: {} deposits credited, {} deactivated, {} total",
        summary.deposits_processed, summary.deposits_deactivated, summary.total_credited
    );
    Ok(summary)
}

async fn accrue_deposit_income(
    db: &DatabaseConnection,
    deposit: &DepositModel,
    now: i64,
) -> Result<(Decimal, bool), DbErr> {
    let txn = db.begin().await?;

    let deposit = Deposit::find_by_id(deposit.id.to_owned())
        .lock_exclusive()
        .one(&txn)
        .await?;
    let deposit = match deposit {
        Some(deposit) if deposit.is_income_active => deposit,
        _ => {
            txn.rollback().await?;
            return Ok((Decimal::ZERO, false));
        }
    };

    let (income_end, daily_amount) = match (deposit.income_end_date, deposit.daily_income_amount) {
        (Some(end), Some(daily)) => (end, daily),
        _ => {
            warn!("Deposit {} approved without an accrual window", deposit.id);
            txn.rollback().await?;
            return Ok((Decimal::ZERO, false));
        }
    };
    let last_accrued = match deposit.last_accrued_date.or(deposit.income_start_date) {
        Some(v) => v,
        None => {
            txn.rollback().await?;
            return Ok((Decimal::ZERO, false));
        }
    };

    let cap = if now < income_end { now } else { income_end };
    let days_due = fin_cal::days_accruable(last_accrued, cap);
    if days_due == 0 {
        // window exhausted without anything left to credit
        if now >= income_end {
            let mut exhausted = deposit.into_active_model();
            exhausted.is_income_active = EntitySet(false);
            exhausted.update(&txn).await?;
            txn.commit().await?;
            return Ok((Decimal::ZERO, true));
        }
        txn.rollback().await?;
        return Ok((Decimal::ZERO, false));
    }

    let credit = daily_amount
        .checked_mul(Decimal::from(days_due))
        .unwrap_or(Decimal::ZERO);
    let new_last_accrued = last_accrued + days_due * fin_cal::SECONDS_PER_DAY;

    let user = UserAccount::find_by_id(deposit.user_id.to_owned())
        .lock_exclusive()
        .one(&txn)
        .await?;
    let user = match user {
        Some(user) => user,
        None => {
            warn!("User {} missing for deposit {}", deposit.user_id, deposit.id);
            txn.rollback().await?;
            return Ok((Decimal::ZERO, false));
        }
    };

    let wallet_balance = user
        .wallet_balance
        .checked_add(credit)
        .unwrap_or(user.wallet_balance);
    let total_earnings = user
        .total_earnings
        .checked_add(credit)
        .unwrap_or(user.total_earnings);
    let todays_earning = user
        .todays_earning
        .checked_add(credit)
        .unwrap_or(user.todays_earning);
    let mut user = user.into_active_model();
    user.wallet_balance = EntitySet(wallet_balance);
    user.total_earnings = EntitySet(total_earnings);
    user.todays_earning = EntitySet(todays_earning);
    user.update(&txn).await?;

    let total_income = deposit
        .total_income_earned
        .checked_add(credit)
        .unwrap_or(deposit.total_income_earned);
    let deactivated = new_last_accrued >= income_end;
    let mut deposit = deposit.into_active_model();
    deposit.total_income_earned = EntitySet(total_income);
    deposit.last_accrued_date = EntitySet(Some(new_last_accrued));
    if deactivated {
        deposit.is_income_active = EntitySet(false);
    }
    deposit.update(&txn).await?;

    txn.commit().await?;
    Ok((credit, deactivated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use stakehub_db_entity::db::user_account::Model as UserModel;

    fn matured_return(now: i64) -> StakeReturnModel {
        StakeReturnModel {
            id: "ret-1".to_owned(),
            stake_id: "stake-1".to_owned(),
            user_id: "user-1".to_owned(),
            original_amount: Decimal::from(100),
            profit_amount: Decimal::from(5),
            handling_fee: Decimal::from(2),
            total_return_amount: Decimal::from(103),
            maturity_date: now - 60,
            status: RETURN_PENDING.to_owned(),
            processed_at: None,
            created_at: now - 7 * fin_cal::SECONDS_PER_DAY,
        }
    }

    fn settled_user(now: i64) -> UserModel {
        UserModel {
            id: "user-1".to_owned(),
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            referral_code: None,
            referred_by: None,
            available_balance: Decimal::ZERO,
            wallet_balance: Decimal::from(10),
            total_staked: Decimal::from(100),
            total_earnings: Decimal::ZERO,
            todays_earning: Decimal::ZERO,
            sell_count: 0,
            created_at: now - 30 * fin_cal::SECONDS_PER_DAY,
        }
    }

    fn accruing_deposit(now: i64, last_accrued: i64, income_end: i64) -> DepositModel {
        DepositModel {
            id: "dep-1".to_owned(),
            user_id: "user-1".to_owned(),
            network_type: "TRC20".to_owned(),
            amount: Decimal::from(1_000),
            status: DEPOSIT_APPROVED.to_owned(),
            income_start_date: Some(now - 10 * fin_cal::SECONDS_PER_DAY),
            income_end_date: Some(income_end),
            daily_income_amount: Some(Decimal::from(10)),
            total_income_earned: Decimal::ZERO,
            is_income_active: true,
            last_accrued_date: Some(last_accrued),
            created_at: now - 11 * fin_cal::SECONDS_PER_DAY,
            processed_at: Some(now - 10 * fin_cal::SECONDS_PER_DAY),
        }
    }

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn matured_return_settles_once() {
        let now = chrono::Utc::now().timestamp();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![matured_return(now)]])
            .append_exec_results(vec![exec_ok(1)])
            .append_query_results(vec![vec![settled_user(now)]])
            .append_query_results(vec![vec![settled_user(now)]])
            .append_exec_results(vec![exec_ok(1)])
            .into_connection();

        let summary = process_matured_stakes(&db, DEFAULT_SWEEP_BATCH_SIZE)
            .await
            .unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn already_settled_return_is_skipped() {
        // the claim matches zero rows when another run completed it first
        let now = chrono::Utc::now().timestamp();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![matured_return(now)]])
            .append_exec_results(vec![exec_ok(0)])
            .into_connection();

        let summary = process_matured_stakes(&db, DEFAULT_SWEEP_BATCH_SIZE)
            .await
            .unwrap();
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn missing_user_leaves_return_pending() {
        // claim succeeds, user row is gone; the rollback must undo the claim
        let now = chrono::Utc::now().timestamp();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![matured_return(now)]])
            .append_exec_results(vec![exec_ok(1)])
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let summary = process_matured_stakes(&db, DEFAULT_SWEEP_BATCH_SIZE)
            .await
            .unwrap();
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn same_day_second_run_credits_nothing() {
        let now = chrono::Utc::now().timestamp();
        let deposit = accruing_deposit(now, now - 600, now + 5 * fin_cal::SECONDS_PER_DAY);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![deposit.clone()]])
            .append_query_results(vec![vec![deposit]])
            .into_connection();

        let summary = process_daily_income(&db).await.unwrap();
        assert_eq!(summary.deposits_processed, 0);
        assert_eq!(summary.deposits_deactivated, 0);
        assert_eq!(summary.total_credited, "0");
    }

    #[tokio::test]
    async fn catch_up_credits_each_whole_day() {
        let now = chrono::Utc::now().timestamp();
        let deposit = accruing_deposit(
            now,
            now - 3 * fin_cal::SECONDS_PER_DAY - 600,
            now + 10 * fin_cal::SECONDS_PER_DAY,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![deposit.clone()]])
            .append_query_results(vec![vec![deposit.clone()]])
            .append_query_results(vec![vec![settled_user(now)]])
            .append_query_results(vec![vec![settled_user(now)]])
            .append_query_results(vec![vec![deposit]])
            .into_connection();

        let summary = process_daily_income(&db).await.unwrap();
        assert_eq!(summary.deposits_processed, 1);
        assert_eq!(summary.deposits_deactivated, 0);
        assert_eq!(summary.total_credited, "30");
    }
}
