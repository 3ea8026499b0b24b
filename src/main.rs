pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
pub mod state;
#[cfg(test)]
mod testing;

use actix_web::{web, App, HttpServer};
use log::{error, info};
use sqlx::{postgres::Postgres, Pool};

use crate::{config::AppConfig, service::log::LoggerMiddleware, state::AppState};

type PGPool = Pool<Postgres>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    service::log::init_logger();
    if let Err(err) = run().await {
        error!("startup error: {}", err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let pool: PGPool = db::init_db_pool(&config).await?;
    db::run_migrations(&pool).await?;

    let bind_addr = config.bind_addr.clone();
    let secret = config.jwt_secret.clone();
    let state = AppState::postgres(pool, config);

    info!("listening on http://{}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(LoggerMiddleware)
            .configure(|cfg| handlers::config(cfg, &secret))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
