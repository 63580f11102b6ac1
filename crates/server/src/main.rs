mod api;
mod page;
mod router;
mod state;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use pawcal_ical::IcsSerializer;
use pawcal_storage::{ArtifactStore, ObjectCounterStore, SequenceIdIssuer, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    pawcal_core::config::load_dotenv();
    let config = pawcal_core::Config::from_env();
    config.log_summary();

    let backend = Arc::new(StorageBackend::from_config(&config)?);
    let counter = ObjectCounterStore::new(backend.store_arc(), &config.reminder.counter_key);
    let issuer = SequenceIdIssuer::new(Arc::new(counter));
    let artifacts = ArtifactStore::new(backend.clone(), &config.reminder);

    let state = Arc::new(state::AppState {
        issuer: Mutex::new(issuer),
        artifacts,
        serializer: Box::new(IcsSerializer::new()),
    });

    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}
