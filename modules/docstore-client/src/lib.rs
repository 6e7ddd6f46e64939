pub mod error;

pub use error::{DocstoreError, Result};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use sitecms_common::DocumentKind;
use sitecms_editor::{CacheInvalidator, DocumentStore};

pub struct DocstoreClient {
    client: reqwest::Client,
    base_url: String,
    revalidate_url: String,
}

impl DocstoreClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            revalidate_url: base_url.clone(),
            base_url,
        })
    }

    /// Send revalidation signals to a different host than the store, e.g. the
    /// public site's render server.
    pub fn with_revalidate_url(mut self, url: &str) -> Self {
        self.revalidate_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the stored document. `None` when the store has nothing for `kind`.
    pub async fn get_document(&self, kind: DocumentKind) -> Result<Option<Value>> {
        let url = format!("{}/api/config/{}", self.base_url, kind);
        let resp = self.client.get(&url).send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            debug!(kind = %kind, "No stored document");
            return Ok(None);
        }
        let resp = check(resp).await?;
        Ok(Some(resp.json().await?))
    }

    /// Replace the stored document. Returns the store's canonical copy.
    pub async fn put_document(&self, kind: DocumentKind, body: &Value) -> Result<Value> {
        let url = format!("{}/api/config/{}", self.base_url, kind);
        let resp = self.client.put(&url).json(body).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn delete_document(&self, kind: DocumentKind) -> Result<()> {
        let url = format!("{}/api/config/{}", self.base_url, kind);
        let resp = self.client.delete(&url).send().await?;
        check(resp).await?;
        Ok(())
    }

    /// The render-ready view the public site sees.
    pub async fn public_document(&self, kind: DocumentKind) -> Result<Value> {
        let url = format!("{}/api/public/{}", self.base_url, kind);
        let resp = self.client.get(&url).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn revalidate(&self, kind: DocumentKind) -> Result<()> {
        let url = format!("{}/api/revalidate", self.revalidate_url);
        let body = serde_json::json!({ "kind": kind });
        let resp = self.client.post(&url).json(&body).send().await?;
        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(DocstoreError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

#[async_trait]
impl DocumentStore for DocstoreClient {
    async fn read(&self, kind: DocumentKind) -> anyhow::Result<Option<Value>> {
        Ok(self.get_document(kind).await?)
    }

    async fn write(&self, kind: DocumentKind, body: &Value) -> anyhow::Result<()> {
        self.put_document(kind, body).await?;
        Ok(())
    }

    async fn delete(&self, kind: DocumentKind) -> anyhow::Result<()> {
        Ok(self.delete_document(kind).await?)
    }
}

#[async_trait]
impl CacheInvalidator for DocstoreClient {
    async fn invalidate(&self, kind: DocumentKind) -> anyhow::Result<()> {
        Ok(self.revalidate(kind).await?)
    }
}
