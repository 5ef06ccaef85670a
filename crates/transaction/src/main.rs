use anyhow::{Context, Result};
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use sqlx::{Pool, Postgres};
use tracing::info;
use transaction::{config::Config, handler::AppRouter, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("transaction-service", config.otel_endpoint.clone());
    let logger_provider = telemetry.init_logger();
    let _meter_provider = telemetry.init_meter();
    let _tracer_provider = telemetry.init_tracer();

    init_logger(
        logger_provider,
        "transaction-service",
        config.dev_mode,
        config.enable_file_log,
    );

    info!("🚀 Starting Transaction Service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::new(db_pool, &config).context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to run HTTP server")?;

    telemetry
        .shutdown()
        .await
        .context("Failed to shutdown telemetry")?;

    info!("✅ Transaction Service shutdown complete.");

    Ok(())
}

async fn run_migrations(pool: &Pool<Postgres>) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
