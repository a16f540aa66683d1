use crate::{config::Config, dto, slack};
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use stakehub_db_entity::db::deposit::{Column as DepositColumn, Entity as Deposit};
use stakehub_db_entity::db::user_account::{Column as UserColumn, Entity as UserAccount};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

/// Triggers the maturity sweep on a fixed interval. Overlap with a manual
/// trigger is harmless; the web API claims each record before settling it.
pub async fn hourly_sweep_loop(config: Config, client: reqwest::Client) {
    let interval_secs = match config.sweep_interval_secs {
        Some(v) => v,
        None => 3_600,
    };
    info!("Maturity sweep loop initialized ({}s interval)", interval_secs);
    loop {
        trigger_maturity_sweep(&config, &client).await;
        sleep(Duration::from_secs(interval_secs)).await;
    }
}

async fn trigger_maturity_sweep(config: &Config, client: &reqwest::Client) {
    let url = config.web_api_node.to_owned() + "/process_matured_stakes";
    let response = client.get(url).send().await;
    match response {
        Ok(response) => match response
            .json::<dto::ResponseData<dto::SweepSummary>>()
            .await
        {
            Ok(body) => match body.data {
                Some(summary) => {
                    info!(
                        "Maturity sweep: {} processed, {} skipped, {} failed",
                        summary.processed, summary.skipped, summary.failed
                    );
                    if config.slack_notification && summary.processed > 0 {
                        slack::post_notification(
                            config,
                            client,
                            format!(
                                "Maturity sweep settled {} stakes ({} skipped, {} failed)",
                                summary.processed, summary.skipped, summary.failed
                            ),
                        )
                        .await;
                    }
                }
                None => warn!("Maturity sweep returned no data: {}", body.message),
            },
            Err(error) => warn!("Could not parse sweep response: {:?}", error),
        },
        Err(error) => warn!("Error executing maturity sweep: {}", error),
    }
}

/// Daily tasks at a configured wall-clock time: deposit income accrual,
/// expired-window deactivation, and the todays_earning counter reset.
pub async fn daily_tasks_loop(config: Config, db: DatabaseConnection, client: reqwest::Client) {
    let daily_sweep_hms = match config.daily_sweep_hms {
        Some(ref v) => v.to_owned(),
        None => "0:30:0".to_owned(),
    };
    let hms: Vec<&str> = daily_sweep_hms.split(':').collect();
    let hour = u32::from_str_radix(hms[0], 10).unwrap();
    let min = u32::from_str_radix(hms[1], 10).unwrap();
    let sec = u32::from_str_radix(hms[2], 10).unwrap();

    info!("Daily tasks initialized at {}:{}:{}", hour, min, sec);
    loop {
        wait_until_next_execution(hour, min, sec).await;

        info!("Daily tasks started");
        trigger_daily_income(&config, &client).await;
        deactivate_expired_deposits(&db).await;
        reset_todays_earnings(&db).await;
        info!("Daily tasks completed");
    }
}

async fn trigger_daily_income(config: &Config, client: &reqwest::Client) {
    let url = config.web_api_node.to_owned() + "/process_daily_income";
    let response = client.get(url).send().await;
    match response {
        Ok(response) => match response
            .json::<dto::ResponseData<dto::DailyIncomeSummary>>()
            .await
        {
            Ok(body) => match body.data {
                Some(summary) => {
                    info!(
                        "Daily income: {} deposits credited, {} deactivated, {} total",
                        summary.deposits_processed,
                        summary.deposits_deactivated,
                        summary.total_credited
                    );
                    if config.slack_notification {
                        slack::post_notification(
                            config,
                            client,
                            format!(
                                "Daily income credited {} across {} deposits",
                                summary.total_credited, summary.deposits_processed
                            ),
                        )
                        .await;
                    }
                }
                None => warn!("Daily income returned no data: {}", body.message),
            },
            Err(error) => warn!("Could not parse daily income response: {:?}", error),
        },
        Err(error) => warn!("Error executing daily income sweep: {}", error),
    }
}

/// Safety net for windows that lapsed without the accrual sweep touching
/// them (e.g. zero-day catch-up on the expiry day).
async fn deactivate_expired_deposits(db: &DatabaseConnection) {
    let now = chrono::Utc::now().timestamp();
    let result = Deposit::update_many()
        .col_expr(DepositColumn::IsIncomeActive, Expr::value(false))
        .filter(DepositColumn::IsIncomeActive.eq(true))
        .filter(DepositColumn::IncomeEndDate.lte(now))
        .exec(db)
        .await;
    match result {
        Ok(result) => {
            if result.rows_affected > 0 {
                info!("Deactivated {} expired deposit windows", result.rows_affected);
            }
        }
        Err(error) => warn!("Could not deactivate expired deposits: {:?}", error.to_string()),
    }
}

async fn reset_todays_earnings(db: &DatabaseConnection) {
    let result = UserAccount::update_many()
        .col_expr(
            UserColumn::TodaysEarning,
            Expr::value(sea_orm::prelude::Decimal::ZERO),
        )
        .filter(UserColumn::TodaysEarning.ne(sea_orm::prelude::Decimal::ZERO))
        .exec(db)
        .await;
    match result {
        Ok(result) => info!("Reset todays_earning for {} users", result.rows_affected),
        Err(error) => warn!("Could not reset todays_earning: {:?}", error.to_string()),
    }
}

async fn wait_until_next_execution(hour: u32, min: u32, sec: u32) {
    let current = Local::now();
    let target = next_execution(current, hour, min, sec);
    let diff = target.timestamp() - current.timestamp();
    sleep(Duration::from_secs(diff.try_into().unwrap())).await;
}

fn next_execution(current: DateTime<Local>, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
    let mut target = Local
        .with_ymd_and_hms(
            current.year(),
            current.month(),
            current.day(),
            hour,
            min,
            sec,
        )
        .unwrap();
    if hour < current.hour()
        || (hour == current.hour() && min < current.minute())
        || (hour == current.hour() && min == current.minute() && sec < current.second())
    {
        target = target
            .checked_add_signed(chrono::Duration::days(1))
            .unwrap();
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_execution_later_today() {
        let current = Local.with_ymd_and_hms(2026, 8, 20, 1, 0, 0).unwrap();
        let target = next_execution(current, 4, 30, 0);
        assert_eq!(target, Local.with_ymd_and_hms(2026, 8, 20, 4, 30, 0).unwrap());
    }

    #[test]
    fn next_execution_rolls_to_tomorrow() {
        let current = Local.with_ymd_and_hms(2026, 8, 20, 5, 0, 0).unwrap();
        let target = next_execution(current, 4, 30, 0);
        assert_eq!(target, Local.with_ymd_and_hms(2026, 8, 21, 4, 30, 0).unwrap());
    }

    #[test]
    fn next_execution_same_instant_runs_today() {
        let current = Local.with_ymd_and_hms(2026, 8, 20, 4, 30, 0).unwrap();
        let target = next_execution(current, 4, 30, 0);
        assert_eq!(target, current);
    }
}
