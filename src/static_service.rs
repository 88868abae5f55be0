use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::OnceCell;

use crate::config::APP_CONFIG;
use crate::error::{AppError, AppResult};

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::const_new();

pub async fn get_database_connection() -> anyhow::Result<&'static DatabaseConnection> {
    let connection = DATABASE_CONNECTION
        .get_or_try_init(|| async {
            let mut options = ConnectOptions::new(APP_CONFIG.database_url.clone());
            options
                .max_connections(20)
                .min_connections(2)
                .connect_timeout(Duration::from_secs(10))
                .sqlx_logging(false);

            tracing::info!("Connecting to database...");
            Database::connect(options).await
        })
        .await?;

    Ok(connection)
}

/// Connection for request handlers. Fails instead of panicking when the pool
/// has not been initialised.
pub fn connection() -> AppResult<&'static DatabaseConnection> {
    DATABASE_CONNECTION
        .get()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("DATABASE_CONNECTION not set")))
}
