//! Directory-backed document store: one `<kind>.json` file per document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use sitecms_common::DocumentKind;
use sitecms_editor::DocumentStore;

pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    /// Open (and create if needed) the data directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("creating data dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path(&self, kind: DocumentKind) -> PathBuf {
        self.dir.join(format!("{kind}.json"))
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp).await?;
    file.write_all(data).await?;
    file.flush().await?;
    fs::rename(tmp, path).await
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn read(&self, kind: DocumentKind) -> Result<Option<Value>> {
        let path = self.path(kind);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        let doc = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(doc))
    }

    async fn write(&self, kind: DocumentKind, body: &Value) -> Result<()> {
        let path = self.path(kind);
        let data = serde_json::to_vec_pretty(body)?;
        write_atomic(&path, &data)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(kind = %kind, bytes = data.len(), "Document written");
        Ok(())
    }

    async fn delete(&self, kind: DocumentKind) -> Result<()> {
        let path = self.path(kind);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("deleting {}", path.display())),
        }
    }
}
