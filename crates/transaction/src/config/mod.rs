use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub product_service_url: String,
    pub otel_endpoint: String,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8002".to_string())
            .parse()
            .context("Invalid PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .context("Missing environment variable: DATABASE_URL")?;

        let db_min_conn = std::env::var("DB_MIN_CONN")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .context("Invalid DB_MIN_CONN")?;

        let db_max_conn = std::env::var("DB_MAX_CONN")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("Invalid DB_MAX_CONN")?;

        let product_service_url = std::env::var("PRODUCT_SERVICE_URL")
            .context("Missing environment variable: PRODUCT_SERVICE_URL")?;

        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .unwrap_or_else(|_| "http://otel-collector:4317".to_string());

        let dev_mode = std::env::var("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = std::env::var("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            port,
            database_url,
            db_min_conn,
            db_max_conn,
            product_service_url,
            otel_endpoint,
            dev_mode,
            enable_file_log,
        })
    }
}
