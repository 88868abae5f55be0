use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

/// Brings the schema up to date before the server accepts traffic.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db)
        .await
        .context("Failed to read migration status")?;

    if pending.is_empty() {
        tracing::info!("Database schema is up to date");
        return Ok(());
    }

    tracing::info!(count = pending.len(), "Applying pending migrations...");
    Migrator::up(db, None)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(())
}
