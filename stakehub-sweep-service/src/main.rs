mod config;
mod dto;
mod scheduler;
mod slack;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use sea_orm::DatabaseConnection;
use std::error::Error;
use std::time::Duration;
use tokio::{task, time::sleep};
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config: config::Config = Figment::new()
        .merge(Toml::file("App.toml"))
        .merge(figment::providers::Env::prefixed("STAKEHUB_"))
        .extract()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.rust_log);
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("stakehub_sweep_service={}", &config.sweep_service_log)
                    .parse()
                    .expect("Error parsing directive"),
            ),
        )
        .with_span_events(FmtSpan::FULL)
        .init();

    let db: DatabaseConnection = config::get_db_connection(&config).await?;

    let client = reqwest::Client::builder()
        .build()
        .expect("Reqwest client failed to initialize!");

    // wait for other instance to shutdown before starting this loop
    let startup_sleep_secs = match config.startup_sleep_secs {
        Some(v) => v,
        None => 10,
    };
    sleep(Duration::from_secs(startup_sleep_secs)).await;

    info!("stakehub-sweep-service started");

    task::spawn(scheduler::daily_tasks_loop(
        config.clone(),
        db.clone(),
        client.clone(),
    ));

    scheduler::hourly_sweep_loop(config, client).await;

    Ok(())
}
