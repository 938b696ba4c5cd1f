pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod credential;
pub(crate) mod routes;
pub(crate) mod types;
pub(crate) mod utils;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::config::Args;
use crate::core::error::ConfigError as Error;
use crate::core::state::AppState;

pub async fn run() -> Result<(), Error> {
    let config = Args::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let auth = config.auth_config()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url())
        .await
        .map_err(Error::Sql)?;

    let state = AppState::new(pool, &auth)?;

    sqlx::migrate!()
        .run(&state.pool)
        .await
        .map_err(Error::DatabaseMigration)?;

    let app = routes::router::routes(state, &config.cors_origins())?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::info!(?auth, "listening on port {}", config.port);

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}
