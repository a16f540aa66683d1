use crate::dto::SlackNotificationData;
use tracing::{info, warn};

pub async fn post_notification(config: &crate::config::Config, client: &reqwest::Client, text: String) {
    let serialized_data = match serde_json::to_string(&SlackNotificationData {
        channel: config.slack_channel_id.to_owned(),
        text,
    }) {
        Ok(json) => json,
        Err(error) => {
            warn!("Error serializing slack payload: {}", error);
            return;
        }
    };
    let response = client
        .post(&config.slack_webhook_url)
        .header("content-type", "application/json")
        .body(serialized_data)
        .send()
        .await;
    match response {
        Ok(resp) => match resp.status() {
            reqwest::StatusCode::OK => {
                info!("Posted to slack channel {}", config.slack_channel_id)
            }
            status => warn!("Slack returned {}", status),
        },
        Err(error) => warn!("Error posting to slack: {:?}", error),
    }
}
