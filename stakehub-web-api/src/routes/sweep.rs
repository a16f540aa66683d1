use crate::dto::{
    DailyIncomeSummary, ResponseData, SweepSummary, RESPONSE_INTERNAL_ERROR, RESPONSE_OK,
};
use crate::pool::{Db, StakehubConfig};
use crate::settlement;
use rocket::{serde::json::Json, State};
use sea_orm_rocket::Connection;
use tracing::{info, warn};

/// Settles matured stake returns. The scheduler hits this hourly; operators
/// can trigger it manually. Re-running over the same matured set is
/// idempotent because each record is claimed with a compare-and-swap.
#[get("/process_matured_stakes", format = "application/json")]
pub async fn process_matured_stakes(
    conn: Connection<'_, Db>,
    config: &State<StakehubConfig>,
) -> Json<ResponseData<SweepSummary>> {
    info!("process_matured_stakes started");
    let db = conn.into_inner();
    let batch_size = match config.sweep_batch_size {
        Some(v) => v,
        None => settlement::DEFAULT_SWEEP_BATCH_SIZE,
    };

    match settlement::process_matured_stakes(db, batch_size).await {
        Ok(summary) => Json(ResponseData::new(
            RESPONSE_OK,
            format!("Processed {} matured stakes.", summary.processed),
            Some(summary),
        )),
        Err(error) => {
            warn!("Maturity sweep failed: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Maturity sweep failed.".to_owned(),
                None,
            ))
        }
    }
}

#[get("/process_daily_income", format = "application/json")]
pub async fn process_daily_income(
    conn: Connection<'_, Db>,
) -> Json<ResponseData<DailyIncomeSummary>> {
    info!("process_daily_income started");
    let db = conn.into_inner();

    match settlement::process_daily_income(db).await {
        Ok(summary) => Json(ResponseData::new(
            RESPONSE_OK,
            format!(
                "Credited {} across {} deposits.",
                summary.total_credited, summary.deposits_processed
            ),
            Some(summary),
        )),
        Err(error) => {
            warn!("Daily income sweep failed: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                "Daily income sweep failed.".to_owned(),
                None,
            ))
        }
    }
}
