use serde::{Deserialize, Serialize};

/// Mirror of the web API response envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct ResponseData<T> {
    pub code: Option<u16>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct SweepSummary {
    pub processed: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DailyIncomeSummary {
    pub deposits_processed: u64,
    pub deposits_deactivated: u64,
    pub total_credited: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SlackNotificationData {
    pub channel: String,
    pub text: String,
}
