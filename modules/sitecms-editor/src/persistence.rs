//! Load, save and reset one document kind against a `DocumentStore`.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use sitecms_common::ConfigDocument;

use crate::error::Result;
use crate::notify::{Notification, Notifier};
use crate::store::{CacheInvalidator, DocumentStore};
use crate::validator::normalize;

/// Result of a load. Both `Loaded` and `Fallback` carry a usable document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<D> {
    /// Read from the store (or defaults when nothing was stored yet).
    Loaded(D),
    /// The read failed; defaults substituted and the operator warned.
    Fallback(D),
    /// Superseded by a newer load. Carries nothing and must not be applied.
    Cancelled,
}

impl<D> LoadOutcome<D> {
    pub fn into_document(self) -> Option<D> {
        match self {
            LoadOutcome::Loaded(doc) | LoadOutcome::Fallback(doc) => Some(doc),
            LoadOutcome::Cancelled => None,
        }
    }
}

pub struct ConfigPersistence<D> {
    store: Arc<dyn DocumentStore>,
    invalidator: Arc<dyn CacheInvalidator>,
    notifier: Arc<dyn Notifier>,
    defaults: D,
    /// Token of the load currently in flight, if any.
    inflight: Mutex<Option<CancellationToken>>,
    invalidations: TaskTracker,
}

impl<D: ConfigDocument> ConfigPersistence<D> {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        invalidator: Arc<dyn CacheInvalidator>,
        notifier: Arc<dyn Notifier>,
        defaults: D,
    ) -> Self {
        Self {
            store,
            invalidator,
            notifier,
            defaults,
            inflight: Mutex::new(None),
            invalidations: TaskTracker::new(),
        }
    }

    pub fn defaults(&self) -> &D {
        &self.defaults
    }

    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// Read and normalize the stored document.
    ///
    /// Single-flight: starting a load cancels the one already in flight,
    /// which then resolves to `Cancelled`. Read or parse failures resolve to
    /// `Fallback(defaults)` with a warning notification.
    pub async fn load(&self) -> LoadOutcome<D> {
        let token = self.begin_load();
        let kind = D::KIND;

        let result = tokio::select! {
            _ = token.cancelled() => {
                debug!(kind = %kind, "Load superseded");
                return LoadOutcome::Cancelled;
            }
            result = self.store.read(kind) => result,
        };
        if !self.finish_load(&token) {
            debug!(kind = %kind, "Load superseded after read");
            return LoadOutcome::Cancelled;
        }

        match result {
            Ok(Some(raw)) => match normalize(&raw, &self.defaults) {
                Ok(doc) => {
                    debug!(kind = %kind, "Document loaded");
                    LoadOutcome::Loaded(doc)
                }
                Err(e) => self.fallback(format!("stored document is unreadable: {e}")),
            },
            Ok(None) => {
                info!(kind = %kind, "No stored document, starting from defaults");
                LoadOutcome::Loaded(self.defaults.clone())
            }
            Err(e) => self.fallback(format!("{e:#}")),
        }
    }

    /// Replace the stored document. On success a cache invalidation is
    /// spawned; its outcome never affects the save.
    pub async fn save(&self, doc: &D) -> Result<D> {
        let kind = D::KIND;
        let body = serde_json::to_value(doc)?;
        if let Err(e) = self.store.write(kind, &body).await {
            warn!(kind = %kind, error = %e, "Save failed");
            return Err(e.into());
        }
        info!(kind = %kind, "Document saved");
        self.spawn_invalidation();
        Ok(doc.clone())
    }

    /// Delete the stored document, then load again, which yields defaults.
    /// Nothing else happens if the delete fails.
    pub async fn reset_to_default(&self) -> Result<D> {
        let kind = D::KIND;
        if let Err(e) = self.store.delete(kind).await {
            warn!(kind = %kind, error = %e, "Reset failed");
            return Err(e.into());
        }
        info!(kind = %kind, "Document reset to defaults");
        self.spawn_invalidation();

        // A newer load superseding this one still observes the deletion.
        Ok(self
            .load()
            .await
            .into_document()
            .unwrap_or_else(|| self.defaults.clone()))
    }

    /// Wait for the cache invalidations spawned so far.
    pub async fn settle(&self) {
        self.invalidations.close();
        self.invalidations.wait().await;
        self.invalidations.reopen();
    }

    fn fallback(&self, reason: String) -> LoadOutcome<D> {
        let kind = D::KIND;
        warn!(kind = %kind, reason = %reason, "Load failed, using defaults");
        self.notifier.notify(Notification::warning(format!(
            "Could not load {kind} settings, showing defaults ({reason})"
        )));
        LoadOutcome::Fallback(self.defaults.clone())
    }

    fn spawn_invalidation(&self) {
        let invalidator = Arc::clone(&self.invalidator);
        let kind = D::KIND;
        self.invalidations.spawn(async move {
            if let Err(e) = invalidator.invalidate(kind).await {
                debug!(kind = %kind, error = %e, "Cache invalidation failed");
            }
        });
    }

    fn inflight(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_load(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.inflight().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Returns false if `token` was superseded. Cancellation happens under
    /// the same lock, so an uncancelled token is still the current one.
    fn finish_load(&self, token: &CancellationToken) -> bool {
        let mut inflight = self.inflight();
        if token.is_cancelled() {
            return false;
        }
        *inflight = None;
        true
    }
}
