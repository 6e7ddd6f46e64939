use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use sitecms_common::DocumentKind;
use sitecms_editor::DocumentStore;

/// Rendered public views plus a per-kind generation. Revalidation bumps the
/// generation, and a render only lands if its generation is still current.
#[derive(Default)]
struct PublicCache {
    views: HashMap<DocumentKind, Value>,
    generations: HashMap<DocumentKind, u64>,
}

impl PublicCache {
    fn generation(&self, kind: DocumentKind) -> u64 {
        self.generations.get(&kind).copied().unwrap_or(0)
    }
}

pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    public_cache: RwLock<PublicCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            public_cache: RwLock::new(PublicCache::default()),
        }
    }

    /// Stored document for `kind`, creating it from defaults on first access.
    /// Items stored without ids get them assigned and written back once.
    pub async fn document_or_create(&self, kind: DocumentKind) -> Result<Value> {
        if let Some(mut doc) = self.store.read(kind).await? {
            if kind.fill_missing_ids(&mut doc) {
                self.store.write(kind, &doc).await?;
                info!(kind = %kind, "Assigned missing item ids");
            }
            return Ok(doc);
        }
        let doc = kind.default_document()?;
        self.store.write(kind, &doc).await?;
        info!(kind = %kind, "Created document from defaults");
        Ok(doc)
    }

    pub async fn public_view(&self, kind: DocumentKind) -> Result<Value> {
        let generation = {
            let cache = self.public_cache.read().await;
            if let Some(view) = cache.views.get(&kind) {
                return Ok(view.clone());
            }
            cache.generation(kind)
        };

        let doc = self.document_or_create(kind).await?;
        let view = kind.public_view(&doc)?;

        let mut cache = self.public_cache.write().await;
        if cache.generation(kind) == generation {
            cache.views.insert(kind, view.clone());
        }
        Ok(view)
    }

    /// Drop the cached public view so the next read renders fresh. Renders
    /// already in flight are not cached.
    pub async fn revalidate(&self, kind: DocumentKind) -> bool {
        let mut cache = self.public_cache.write().await;
        *cache.generations.entry(kind).or_insert(0) += 1;
        cache.views.remove(&kind).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use sitecms_editor::testing::ScriptedStore;

    use super::*;

    fn marquee_titled(title: &str) -> Value {
        let mut doc = DocumentKind::LogoMarquee.default_document().unwrap();
        doc["title"] = json!(title);
        doc
    }

    #[tokio::test]
    async fn render_overtaken_by_revalidation_is_not_cached() {
        let store = Arc::new(ScriptedStore::new());
        store.memory().insert(DocumentKind::LogoMarquee, marquee_titled("Old"));
        let state = Arc::new(AppState::new(store.clone()));

        store.hold();
        let slow = tokio::spawn({
            let state = state.clone();
            async move { state.public_view(DocumentKind::LogoMarquee).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        store.memory().insert(DocumentKind::LogoMarquee, marquee_titled("New"));
        state.revalidate(DocumentKind::LogoMarquee).await;

        store.release(1);
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale["title"], "Old");

        store.release(1);
        let fresh = state.public_view(DocumentKind::LogoMarquee).await.unwrap();
        assert_eq!(fresh["title"], "New");
    }

    #[tokio::test]
    async fn cached_view_is_served_without_reading() {
        let store = Arc::new(ScriptedStore::new());
        let state = AppState::new(store.clone());
        let first = state.public_view(DocumentKind::Services).await.unwrap();

        store.hold();
        let second = state.public_view(DocumentKind::Services).await.unwrap();

        assert_eq!(first, second);
    }
}
