//! Serves the document store. Documents live under `SITECMS_DATA_DIR` when
//! it is set; otherwise they are kept in memory and lost on exit.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sitecms_api::{app, AppState, FileDocumentStore};
use sitecms_common::Config;
use sitecms_editor::{DocumentStore, MemoryDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sitecms=info".parse()?))
        .init();

    let config = Config::from_env();
    config.log_summary();

    let store: Arc<dyn DocumentStore> = match &config.data_dir {
        Some(dir) => Arc::new(FileDocumentStore::open(dir).await?),
        None => {
            warn!("SITECMS_DATA_DIR not set, documents are kept in memory only");
            Arc::new(MemoryDocumentStore::new())
        }
    };
    let state = Arc::new(AppState::new(store));

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("sitecms API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
