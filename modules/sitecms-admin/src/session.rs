use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use docstore_client::DocstoreClient;
use sitecms_common::{Config, ConfigDocument};
use sitecms_editor::{
    CacheInvalidator, ConfigClient, ConfigPersistence, DocumentStore, LoadStatus, TracingNotifier,
};

/// Store and revalidation endpoints for one CLI run.
pub struct Remote {
    store: Arc<dyn DocumentStore>,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl Remote {
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = DocstoreClient::new(&config.docstore_url)?;
        let invalidator =
            DocstoreClient::new(&config.docstore_url)?.with_revalidate_url(&config.revalidate_url);
        Ok(Self::new(Arc::new(store), Arc::new(invalidator)))
    }

    pub fn new(store: Arc<dyn DocumentStore>, invalidator: Arc<dyn CacheInvalidator>) -> Self {
        Self { store, invalidator }
    }

    /// Start a session and load the document. A failed read is an error
    /// here: saving the fallback defaults would overwrite the stored copy.
    pub async fn open<D: ConfigDocument>(&self) -> Result<ConfigClient<D>> {
        let persistence = ConfigPersistence::new(
            self.store.clone(),
            self.invalidator.clone(),
            Arc::new(TracingNotifier),
            D::defaults(),
        );
        let client = ConfigClient::new(Arc::new(persistence));
        if client.load().await? != LoadStatus::Loaded {
            bail!("could not load {} settings", D::KIND);
        }
        Ok(client)
    }

    pub async fn show<D: ConfigDocument>(&self) -> Result<D> {
        let client = self.open::<D>().await?;
        client.document().context("session has no document")
    }

    /// Load, apply one edit, save. Returns the document as saved.
    pub async fn edit<D: ConfigDocument>(
        &self,
        change: impl FnOnce(&D) -> Result<D>,
    ) -> Result<D> {
        let client = self.open::<D>().await?;
        let current = client.document().context("session has no document")?;
        let next = change(&current)?;
        client.edit(|_| next)?;

        if client.is_dirty() {
            client.save().await?;
            client.settle().await;
        } else {
            info!(kind = %D::KIND, "Nothing changed");
        }
        client.document().context("session has no document")
    }

    pub async fn reset<D: ConfigDocument>(&self) -> Result<D> {
        let client = self.open::<D>().await?;
        client.reset_to_default().await?;
        client.settle().await;
        client.document().context("session has no document")
    }
}
