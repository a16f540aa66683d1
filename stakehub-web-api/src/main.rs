mod cors;
mod dto;
mod fin_cal;
mod maintenance;
mod pool;
mod routes;
mod settlement;
mod sql_stmt;

use dto::{ResponseData, RESPONSE_BAD_REQUEST, RESPONSE_INTERNAL_ERROR};
use pool::Db;
use rocket::{serde::json::Json, Config, Request};
use sea_orm_rocket::Database;
use std::collections::HashSet;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[macro_use]
extern crate rocket;

#[get("/")]
async fn health_ping() -> &'static str {
    ""
}

#[get("/maintenance_mode")]
async fn maintenance_mode() -> Json<ResponseData<&'static str>> {
    let response = ResponseData {
        code: Some(503),
        status_code: None,
        message: "".to_string(),
        data: None,
    };
    Json(response)
}

#[catch(404)]
async fn bad_request(req: &Request<'_>) -> Json<ResponseData<String>> {
    let message = format!("Couldn't find '{}'", req.uri());
    Json(ResponseData::new(RESPONSE_BAD_REQUEST, message, None))
}

#[catch(500)]
async fn internal_error() -> Json<ResponseData<String>> {
    Json(ResponseData::new(
        RESPONSE_INTERNAL_ERROR,
        "Whoops! Looks like we messed up.".to_owned(),
        None,
    ))
}

#[catch(404)]
async fn all_stakes_bad_data() -> Json<ResponseData<String>> {
    let message =
        format!("Please check params. 'status' should be active or completed only.");
    Json(ResponseData::new(RESPONSE_BAD_REQUEST, message, None))
}

#[launch]
async fn rocket() -> _ {
    let stakehub_config = Config::figment().extract::<pool::StakehubConfig>().unwrap();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &stakehub_config.rust_log);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("stakehub_web_api={}", &stakehub_config.web_api_log)
                    .parse()
                    .expect("Error parsing directive"),
            ),
        )
        .with_span_events(FmtSpan::FULL)
        .init();

    let allowed_domains: HashSet<String> = stakehub_config
        .cors_allowed_domains
        .split(',')
        .map(|s| s.to_owned())
        .collect();

    rocket::build()
        .register("/all_stakes", catchers![all_stakes_bad_data])
        .register("/", catchers![internal_error, bad_request])
        .attach(Db::init())
        .attach(maintenance::MaintenanceMode)
        .manage(stakehub_config)
        .attach(cors::OriginHeader { allowed_domains })
        .attach(routes::mount())
        .mount("/", routes![health_ping, maintenance_mode])
}
