//! Editing model for the site's configuration documents.
//!
//! A session loads a document through `ConfigPersistence`, which normalizes
//! it against explicit defaults. `ConfigClient` holds the working copy and
//! applies pure updaters produced by `Collection` and `NestedCollection`,
//! tracking dirtiness. Saving writes the whole document; a failed save rolls
//! the working copy back to its pre-save snapshot.

pub mod areas;
pub mod client;
pub mod collection;
pub mod error;
pub mod nested;
pub mod notify;
pub mod persistence;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod validator;

pub use client::{ConfigClient, LoadStatus, SessionState, WorkingCopy};
pub use collection::{Collection, Direction, Target};
pub use error::{EditorError, Result};
pub use nested::NestedCollection;
pub use notify::{
    BroadcastNotifier, MemoryNotifier, Notification, NotificationLevel, Notifier, TracingNotifier,
};
pub use persistence::{ConfigPersistence, LoadOutcome};
pub use store::{CacheInvalidator, DocumentStore, MemoryDocumentStore, NoopInvalidator};
pub use validator::normalize;
