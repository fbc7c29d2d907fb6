use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use time::UtcOffset;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app_state::AppState;

mod adapters;
mod app_state;
mod config;
mod domain;
mod router;
mod routes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mam_api=debug,tower_http=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Must be read before any other thread exists.
    let offset = UtcOffset::current_local_offset().unwrap_or_else(|_| {
        tracing::warn!("Could not determine local offset, computing weeks in UTC");
        UtcOffset::UTC
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve(offset))
}

async fn serve(offset: UtcOffset) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::read_config()?;
    tracing::debug!("Loaded settings, database: {:?}", settings.database);

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(settings.database.connect_options());

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations applied");

    let app_state = AppState::new(db_pool, offset);
    let app = router::create(app_state, &settings.application);

    let addr: SocketAddr = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    )
    .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
