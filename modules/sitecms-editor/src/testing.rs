// Test doubles for the store and cache seams.
//
// - FailingStore: every call errors (network down).
// - ScriptedStore: in-memory store with switchable write/delete failures and
//   a gate that holds calls until released, for in-flight scenarios.
// - RecordingInvalidator: reports invalidated kinds over a channel.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, Semaphore};

use sitecms_common::DocumentKind;

use crate::store::{CacheInvalidator, DocumentStore, MemoryDocumentStore};

// ---------------------------------------------------------------------------
// FailingStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FailingStore;

impl FailingStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn read(&self, kind: DocumentKind) -> Result<Option<Value>> {
        bail!("connection refused reading {kind}")
    }

    async fn write(&self, kind: DocumentKind, _body: &Value) -> Result<()> {
        bail!("connection refused writing {kind}")
    }

    async fn delete(&self, kind: DocumentKind) -> Result<()> {
        bail!("connection refused deleting {kind}")
    }
}

// ---------------------------------------------------------------------------
// ScriptedStore
// ---------------------------------------------------------------------------

pub struct ScriptedStore {
    inner: MemoryDocumentStore,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
    held: AtomicBool,
    gate: Semaphore,
}

impl Default for ScriptedStore {
    fn default() -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            fail_writes: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self) -> &MemoryDocumentStore {
        &self.inner
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent call wait until `release` lets it through.
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Let `calls` held calls proceed.
    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }

    async fn pass_gate(&self) -> Result<()> {
        if self.held.load(Ordering::SeqCst) {
            self.gate.acquire().await?.forget();
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn read(&self, kind: DocumentKind) -> Result<Option<Value>> {
        self.pass_gate().await?;
        self.inner.read(kind).await
    }

    async fn write(&self, kind: DocumentKind, body: &Value) -> Result<()> {
        self.pass_gate().await?;
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("store rejected {kind} write");
        }
        self.inner.write(kind, body).await
    }

    async fn delete(&self, kind: DocumentKind) -> Result<()> {
        self.pass_gate().await?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            bail!("store rejected {kind} delete");
        }
        self.inner.delete(kind).await
    }
}

// ---------------------------------------------------------------------------
// RecordingInvalidator
// ---------------------------------------------------------------------------

pub struct RecordingInvalidator {
    sender: Option<mpsc::UnboundedSender<DocumentKind>>,
}

impl RecordingInvalidator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DocumentKind>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// An invalidator whose every call fails.
    pub fn failing() -> Self {
        Self { sender: None }
    }
}

#[async_trait]
impl CacheInvalidator for RecordingInvalidator {
    async fn invalidate(&self, kind: DocumentKind) -> Result<()> {
        match &self.sender {
            Some(sender) => {
                let _ = sender.send(kind);
                Ok(())
            }
            None => bail!("revalidate endpoint unreachable"),
        }
    }
}
