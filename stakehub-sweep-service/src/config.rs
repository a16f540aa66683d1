use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub web_api_node: String,
    pub rust_log: String,
    pub sweep_service_log: String,
    pub startup_sleep_secs: Option<u64>,
    pub sweep_interval_secs: Option<u64>,
    pub daily_sweep_hms: Option<String>,
    pub slack_notification: bool,
    pub slack_webhook_url: String,
    pub slack_channel_id: String,
    pub sqlx_max_connections: u32,
    pub sqlx_min_connections: Option<u32>,
    pub sqlx_connect_timeout: Option<u64>,
    pub sqlx_logging: Option<bool>,
    pub sweep_sqlx_logging_level: String,
}

pub async fn get_db_connection(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options: ConnectOptions = config.database_url.to_owned().into();
    options
        .max_connections(config.sqlx_max_connections)
        .min_connections(match config.sqlx_min_connections {
            Some(v) => v,
            None => 2,
        })
        .connect_timeout(Duration::from_secs(match config.sqlx_connect_timeout {
            Some(v) => v,
            None => 8,
        }))
        .sqlx_logging(match config.sqlx_logging {
            Some(v) => v,
            None => false,
        })
        .sqlx_logging_level(
            match config
                .sweep_sqlx_logging_level
                .parse::<log::LevelFilter>()
            {
                Ok(level) => level,
                Err(_) => log::LevelFilter::Info,
            },
        );

    sea_orm::Database::connect(options).await
}
