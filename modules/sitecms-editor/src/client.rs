//! Edit session over one configuration document.
//!
//! ```text
//! Loading -> Ready(clean) <-> Ready(dirty) -> Saving -> Ready(clean)
//!                                                    \-> Ready(dirty, rolled back)
//!              Ready -> Resetting -> Ready(clean defaults) | Ready(unchanged)
//! ```
//!
//! The session lock is never held across an await, so a `ConfigClient` can
//! be shared between tasks. Saves and resets are exclusive: while one is in
//! flight, edits, loads, saves and resets are rejected with
//! `SaveInProgress` or `ResetInProgress` until it resolves.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use sitecms_common::{ConfigDocument, ItemId};

use crate::error::{EditorError, Result};
use crate::notify::Notification;
use crate::persistence::{ConfigPersistence, LoadOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Ready,
    Saving,
    Resetting,
}

/// The client's edit buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingCopy<D> {
    pub document: D,
    /// True when `document` differs from the last loaded or saved one.
    pub dirty: bool,
    /// Item the operator currently has open, if any.
    pub editing: Option<ItemId>,
}

impl<D> WorkingCopy<D> {
    fn clean(document: D) -> Self {
        Self {
            document,
            dirty: false,
            editing: None,
        }
    }
}

/// What a `load` call did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// Defaults are in use because the read failed.
    Fallback,
    /// A newer load took over; this call changed nothing.
    Superseded,
}

struct Session<D> {
    state: SessionState,
    working: Option<WorkingCopy<D>>,
}

pub struct ConfigClient<D> {
    persistence: Arc<ConfigPersistence<D>>,
    session: Mutex<Session<D>>,
}

impl<D: ConfigDocument> ConfigClient<D> {
    pub fn new(persistence: Arc<ConfigPersistence<D>>) -> Self {
        Self {
            persistence,
            session: Mutex::new(Session {
                state: SessionState::Loading,
                working: None,
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session().state
    }

    pub fn is_dirty(&self) -> bool {
        self.session().working.as_ref().is_some_and(|w| w.dirty)
    }

    pub fn working_copy(&self) -> Option<WorkingCopy<D>> {
        self.session().working.clone()
    }

    pub fn document(&self) -> Option<D> {
        self.session().working.as_ref().map(|w| w.document.clone())
    }

    /// Fetch the document and make it the clean working copy.
    pub async fn load(&self) -> Result<LoadStatus> {
        {
            let mut session = self.session();
            exclusive_check(session.state)?;
            session.state = SessionState::Loading;
        }

        let (document, status) = match self.persistence.load().await {
            LoadOutcome::Loaded(doc) => (doc, LoadStatus::Loaded),
            LoadOutcome::Fallback(doc) => (doc, LoadStatus::Fallback),
            LoadOutcome::Cancelled => return Ok(LoadStatus::Superseded),
        };

        let mut session = self.session();
        if session.state != SessionState::Loading {
            return Ok(LoadStatus::Superseded);
        }
        session.working = Some(WorkingCopy::clean(document));
        session.state = SessionState::Ready;
        info!(kind = %D::KIND, status = ?status, "Session ready");
        Ok(status)
    }

    /// Apply a pure updater to the working copy. The copy becomes dirty if
    /// the updater changed anything.
    pub fn edit(&self, updater: impl FnOnce(&D) -> D) -> Result<()> {
        let mut session = self.session();
        let working = ready_copy(&mut session)?;
        let next = updater(&working.document);
        if next != working.document {
            working.document = next;
            working.dirty = true;
            debug!(kind = %D::KIND, "Working copy changed");
        }
        Ok(())
    }

    /// In-place variant of [`edit`](Self::edit) for scalar settings.
    pub fn modify(&self, change: impl FnOnce(&mut D)) -> Result<()> {
        self.edit(|doc| {
            let mut next = doc.clone();
            change(&mut next);
            next
        })
    }

    pub fn begin_editing(&self, id: ItemId) -> Result<()> {
        let mut session = self.session();
        ready_copy(&mut session)?.editing = Some(id);
        Ok(())
    }

    pub fn finish_editing(&self) -> Result<()> {
        let mut session = self.session();
        ready_copy(&mut session)?.editing = None;
        Ok(())
    }

    /// Write the working copy. On failure the working copy is restored to
    /// the snapshot taken here, the operator is told, and the error returned.
    pub async fn save(&self) -> Result<()> {
        let snapshot = {
            let mut session = self.session();
            let snapshot = ready_copy(&mut session)?.clone();
            session.state = SessionState::Saving;
            snapshot
        };

        let result = self.persistence.save(&snapshot.document).await;

        let mut session = self.session();
        session.state = SessionState::Ready;
        match result {
            Ok(saved) => {
                session.working = Some(WorkingCopy {
                    document: saved,
                    dirty: false,
                    editing: snapshot.editing,
                });
                drop(session);
                self.persistence
                    .notify(Notification::success(format!("{} settings saved", D::KIND)));
                Ok(())
            }
            Err(e) => {
                session.working = Some(snapshot);
                drop(session);
                self.persistence.notify(Notification::error(format!(
                    "Could not save {} settings: {e}",
                    D::KIND
                )));
                Err(e)
            }
        }
    }

    /// Delete the stored document and continue from built-in defaults. On
    /// failure the working copy is left as it was.
    pub async fn reset_to_default(&self) -> Result<()> {
        {
            let mut session = self.session();
            ready_copy(&mut session)?;
            session.state = SessionState::Resetting;
        }

        let result = self.persistence.reset_to_default().await;

        let mut session = self.session();
        session.state = SessionState::Ready;
        match result {
            Ok(document) => {
                session.working = Some(WorkingCopy::clean(document));
                drop(session);
                self.persistence.notify(Notification::success(format!(
                    "{} settings reset to defaults",
                    D::KIND
                )));
                Ok(())
            }
            Err(e) => {
                drop(session);
                self.persistence.notify(Notification::error(format!(
                    "Could not reset {} settings: {e}",
                    D::KIND
                )));
                Err(e)
            }
        }
    }

    /// Wait for pending cache invalidations, e.g. before a CLI exits.
    pub async fn settle(&self) {
        self.persistence.settle().await;
    }

    fn session(&self) -> MutexGuard<'_, Session<D>> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Rejects anything that would overlap a save or reset in flight.
fn exclusive_check(state: SessionState) -> Result<()> {
    match state {
        SessionState::Saving => Err(EditorError::SaveInProgress),
        SessionState::Resetting => Err(EditorError::ResetInProgress),
        SessionState::Loading | SessionState::Ready => Ok(()),
    }
}

fn ready_copy<D>(session: &mut Session<D>) -> Result<&mut WorkingCopy<D>> {
    exclusive_check(session.state)?;
    match session.state {
        SessionState::Ready => session.working.as_mut().ok_or(EditorError::NotReady),
        _ => Err(EditorError::NotReady),
    }
}
