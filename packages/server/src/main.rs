use std::sync::Arc;

use anyhow::Context;
use tracing::{Level, info};

use common::media::filesystem::FilesystemMediaStore;
use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = server::database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    server::seed::seed_defaults(&db)
        .await
        .context("Failed to seed reference data")?;

    let media = FilesystemMediaStore::new(
        config.media.root.clone().into(),
        config.media.max_upload_size,
    )
    .await
    .context("Failed to open media store")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config,
        db,
        media: Arc::new(media),
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("inkwell listening at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
