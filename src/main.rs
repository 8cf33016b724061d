use std::fs::OpenOptions;

use actix_web::{web, App, HttpServer};
use sea_orm::Database;
use tracing::{info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{filter, fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::auth::Authority;

mod config;
mod consts;
mod error;
mod utils;

mod entity;
mod auth;
mod pay;
mod pages;

#[actix_web::main]
async fn main() {
    let _ = dotenvy::dotenv();

    init_tracing();

    let config::Config {
        host_address,
        database_opt,
        jwt_key,
        pay_run,
    } = config::load();

    let database = web::Data::new(Database::connect(database_opt).await.expect("Unable to connect to database"));
    let authority = web::Data::new(Authority::new(jwt_key.as_bytes()));
    let pay_run = web::Data::new(pay_run);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(database.clone())
            .app_data(authority.clone())
            .app_data(pay_run.clone())
            .wrap(TracingLogger::default())
            .configure(pages::config)
    });

    let server = server
        .bind(host_address).expect("Unable to bind `HOST_ADDRESS`");

    info!(addresses = ?server.addrs(), "listening");

    server
        .run().await.expect("Server stopped unexpectedly");
}

/// Human readable output on stdout, filtered by `RUST_LOG`, plus everything down to
/// `TRACE` appended to `trace.log`
fn init_tracing() {
    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("trace.log")
        .expect("Unable to open `trace.log`");

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_line_number(true)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(Level::TRACE))
        );

    tracing::subscriber::set_global_default(subscriber).expect("Unable to install tracing subscriber");
}
