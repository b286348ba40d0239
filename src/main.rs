use axum::{routing::get, Router};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use anyhow::Result;

mod config;
mod error;
mod models;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::load()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    let app = Router::new()
        .merge(routes::cycle_entries::routes(pool.clone()))
        .merge(routes::body_changes::routes(pool.clone()))
        .merge(routes::bowel_movements::routes(pool.clone()))
        .merge(routes::cognitive_assessment::routes(pool.clone()))
        .merge(routes::medications::routes(pool.clone()))
        .merge(routes::collective_entries::routes(pool.clone()))
        .merge(routes::users::routes(pool.clone()))
        .route("/health", get(|| async { "✅ Backend up" }));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🌙 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
