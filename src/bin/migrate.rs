//! Applies the schema for `DATABASE_URL` and exits; the server does the same on startup.

use sea_orm::ConnectionTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use products_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    let backend = orm.get_database_backend();

    run_migrations(&orm).await?;
    tracing::info!(?backend, "products schema is up to date");

    orm.close().await?;
    Ok(())
}
