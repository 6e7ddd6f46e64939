//! Seams to the document store and the public render cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use sitecms_common::DocumentKind;

/// Durable home of the configuration documents, one per kind.
///
/// Implemented by `docstore_client::DocstoreClient` (HTTP) and
/// `MemoryDocumentStore` (tests, local tooling).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Current document, or `None` when nothing is stored for `kind`.
    async fn read(&self, kind: DocumentKind) -> Result<Option<Value>>;

    /// Replace the whole document. Never a partial patch.
    async fn write(&self, kind: DocumentKind, body: &Value) -> Result<()>;

    async fn delete(&self, kind: DocumentKind) -> Result<()>;
}

/// Tells the public-facing render cache that a document changed.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, kind: DocumentKind) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryDocumentStore
// ---------------------------------------------------------------------------

/// In-process store. Thread-safe; clones of the inner map are handed out.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<DocumentKind, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one document.
    pub fn with_document(kind: DocumentKind, body: Value) -> Self {
        let store = Self::new();
        store.insert(kind, body);
        store
    }

    pub fn insert(&self, kind: DocumentKind, body: Value) {
        self.lock().insert(kind, body);
    }

    pub fn get(&self, kind: DocumentKind) -> Option<Value> {
        self.lock().get(&kind).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<DocumentKind, Value>> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read(&self, kind: DocumentKind) -> Result<Option<Value>> {
        Ok(self.get(kind))
    }

    async fn write(&self, kind: DocumentKind, body: &Value) -> Result<()> {
        self.insert(kind, body.clone());
        Ok(())
    }

    async fn delete(&self, kind: DocumentKind) -> Result<()> {
        self.lock().remove(&kind);
        Ok(())
    }
}

/// Invalidator for setups without a public cache.
pub struct NoopInvalidator;

#[async_trait]
impl CacheInvalidator for NoopInvalidator {
    async fn invalidate(&self, _kind: DocumentKind) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Arc<T> blankets: lets tests keep a handle for assertions
// ---------------------------------------------------------------------------

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn read(&self, kind: DocumentKind) -> Result<Option<Value>> {
        (**self).read(kind).await
    }

    async fn write(&self, kind: DocumentKind, body: &Value) -> Result<()> {
        (**self).write(kind, body).await
    }

    async fn delete(&self, kind: DocumentKind) -> Result<()> {
        (**self).delete(kind).await
    }
}

#[async_trait]
impl<C: CacheInvalidator + ?Sized> CacheInvalidator for Arc<C> {
    async fn invalidate(&self, kind: DocumentKind) -> Result<()> {
        (**self).invalidate(kind).await
    }
}
