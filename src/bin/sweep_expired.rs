//! Daily expiration sweep entry point.
//!
//! The platform's scheduler (cron, systemd timer, or equivalent) runs
//! this binary once a day. The sweep converges, so running it more
//! often, or again after a failure, is harmless.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use boutique_premium::adapters::email::ResendMailer;
use boutique_premium::adapters::postgres::{PostgresMembershipStore, PostgresUserDirectory};
use boutique_premium::application::ExpirationSweepHandler;
use boutique_premium::config::AppConfig;
use boutique_premium::domain::foundation::Timestamp;
use boutique_premium::domain::notification::NotificationDispatcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;
    let policy = config.premium.to_policy()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    let memberships = Arc::new(PostgresMembershipStore::new(pool.clone()));
    let users = Arc::new(PostgresUserDirectory::new(pool));
    let mailer = Arc::new(ResendMailer::new(&config.email));
    let notifier = NotificationDispatcher::new(mailer, policy);

    let handler = ExpirationSweepHandler::new(memberships, users, notifier);
    let deactivated = handler.sweep(Timestamp::now()).await;

    tracing::info!(deactivated, "Expiration sweep run complete");
    Ok(())
}
