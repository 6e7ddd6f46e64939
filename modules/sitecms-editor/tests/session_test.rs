//! End-to-end edit sessions against in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use sitecms_common::{
    BulletPoint, ConfigDocument, NavItem, NavbarConfig, ServicesConfig, SubMenuItem,
};
use sitecms_editor::testing::{RecordingInvalidator, ScriptedStore};
use sitecms_editor::{
    areas, ConfigClient, ConfigPersistence, Direction, EditorError, LoadOutcome, LoadStatus,
    MemoryNotifier, NoopInvalidator, NotificationLevel, SessionState,
};

fn session<D: ConfigDocument>(
    store: Arc<ScriptedStore>,
    notifier: Arc<MemoryNotifier>,
) -> Arc<ConfigClient<D>> {
    Arc::new(ConfigClient::new(Arc::new(ConfigPersistence::new(
        store,
        Arc::new(NoopInvalidator),
        notifier,
        D::defaults(),
    ))))
}

fn single_item_navbar() -> NavbarConfig {
    let mut doc = NavbarConfig::defaults();
    doc.items = vec![NavItem {
        order: 1,
        ..NavItem::new("A", "/a")
    }];
    doc
}

// ---------------------------------------------------------------------------
// Collection scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_move_update_scenario() {
    let store = Arc::new(ScriptedStore::new());
    store.memory().insert(
        NavbarConfig::KIND,
        serde_json::to_value(single_item_navbar()).unwrap(),
    );
    let client = session::<NavbarConfig>(store, Arc::new(MemoryNotifier::new()));
    client.load().await.unwrap();
    let items = areas::nav_items();

    client
        .edit(|doc| items.add(doc, NavItem::new("B", "/b")))
        .unwrap();
    let doc = client.document().unwrap();
    let shape: Vec<(&str, i64, bool)> = doc
        .items
        .iter()
        .map(|i| (i.name.as_str(), i.order, i.is_active))
        .collect();
    assert_eq!(shape, vec![("A", 1, true), ("B", 2, true)]);

    client
        .edit(|doc| items.move_item(doc, 1, Direction::Up))
        .unwrap();
    let doc = client.document().unwrap();
    let shape: Vec<(&str, i64)> = doc.items.iter().map(|i| (i.name.as_str(), i.order)).collect();
    assert_eq!(shape, vec![("B", 2), ("A", 1)]);

    client
        .edit(|doc| items.update(doc, 0, |item| item.is_active = false))
        .unwrap();
    let doc = client.document().unwrap();
    assert_eq!(doc.items[0].name, "B");
    assert!(!doc.items[0].is_active);
    assert!(doc.items[1].is_active);
    assert!(client.is_dirty());
}

#[tokio::test]
async fn nested_edits_through_the_session() {
    let client = session::<ServicesConfig>(
        Arc::new(ScriptedStore::new()),
        Arc::new(MemoryNotifier::new()),
    );
    client.load().await.unwrap();
    let bullets = areas::service_bullets();
    let service_id = client.document().unwrap().services[0].id.clone();

    client
        .edit(|doc| bullets.add(doc, &service_id, BulletPoint::new("5G rollout")))
        .unwrap();

    let doc = client.document().unwrap();
    let texts: Vec<&str> = bullets
        .items(&doc, &service_id)
        .iter()
        .map(|b| b.text.as_str())
        .collect();
    assert_eq!(texts, vec!["RAN and core planning", "OSS/BSS integration", "5G rollout"]);
}

#[tokio::test]
async fn sub_menu_survives_save_and_reload() {
    let store = Arc::new(ScriptedStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let client = session::<NavbarConfig>(store.clone(), notifier.clone());
    client.load().await.unwrap();
    let subs = areas::nav_sub_menu();

    client
        .edit(|doc| subs.add(doc, 0, SubMenuItem::new("Careers", "/careers")))
        .unwrap();
    client.save().await.unwrap();

    let reopened = session::<NavbarConfig>(store, notifier);
    reopened.load().await.unwrap();
    let doc = reopened.document().unwrap();
    assert_eq!(subs.items(&doc, 0).len(), 1);
    assert_eq!(doc, client.document().unwrap());
}

// ---------------------------------------------------------------------------
// Save semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_save_rolls_back_to_snapshot() {
    let store = Arc::new(ScriptedStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let client = session::<NavbarConfig>(store.clone(), notifier.clone());
    client.load().await.unwrap();
    client.modify(|doc| doc.sticky = false).unwrap();
    let before = client.working_copy().unwrap();
    assert!(before.dirty);

    store.fail_writes(true);
    let result = client.save().await;

    assert!(matches!(result, Err(EditorError::Store(_))));
    assert_eq!(client.working_copy().unwrap(), before);
    assert!(client.is_dirty());
    assert_eq!(client.state(), SessionState::Ready);
    assert_eq!(notifier.levels(), vec![NotificationLevel::Error]);
    assert!(store.memory().get(NavbarConfig::KIND).is_none());
}

#[tokio::test]
async fn retry_after_failed_save_succeeds() {
    let store = Arc::new(ScriptedStore::new());
    let client = session::<NavbarConfig>(store.clone(), Arc::new(MemoryNotifier::new()));
    client.load().await.unwrap();
    client.modify(|doc| doc.cta_label = "Talk to us".into()).unwrap();

    store.fail_writes(true);
    assert!(client.save().await.is_err());
    store.fail_writes(false);
    client.save().await.unwrap();

    assert!(!client.is_dirty());
    let stored = store.memory().get(NavbarConfig::KIND).unwrap();
    assert_eq!(stored["ctaLabel"], "Talk to us");
}

#[tokio::test]
async fn second_save_while_saving_is_rejected() {
    let store = Arc::new(ScriptedStore::new());
    let client = session::<NavbarConfig>(store.clone(), Arc::new(MemoryNotifier::new()));
    client.load().await.unwrap();
    client.modify(|doc| doc.show_theme_toggle = false).unwrap();

    store.hold();
    let first = tokio::spawn({
        let client = client.clone();
        async move { client.save().await }
    });
    while client.state() != SessionState::Saving {
        tokio::task::yield_now().await;
    }

    assert!(matches!(client.save().await, Err(EditorError::SaveInProgress)));
    assert!(matches!(
        client.modify(|doc| doc.sticky = false),
        Err(EditorError::SaveInProgress)
    ));
    assert!(matches!(client.load().await, Err(EditorError::SaveInProgress)));
    assert!(matches!(
        client.reset_to_default().await,
        Err(EditorError::SaveInProgress)
    ));

    store.release(1);
    first.await.unwrap().unwrap();
    assert_eq!(client.state(), SessionState::Ready);
    assert!(!client.is_dirty());
}

#[tokio::test]
async fn reset_in_flight_blocks_other_operations() {
    let store = Arc::new(ScriptedStore::new());
    let client = session::<NavbarConfig>(store.clone(), Arc::new(MemoryNotifier::new()));
    client.load().await.unwrap();
    client.modify(|doc| doc.cta_label = "Talk to us".into()).unwrap();
    client.save().await.unwrap();

    store.hold();
    let reset = tokio::spawn({
        let client = client.clone();
        async move { client.reset_to_default().await }
    });
    while client.state() != SessionState::Resetting {
        tokio::task::yield_now().await;
    }

    assert!(matches!(client.save().await, Err(EditorError::ResetInProgress)));
    assert!(matches!(
        client.modify(|doc| doc.sticky = false),
        Err(EditorError::ResetInProgress)
    ));
    assert!(matches!(client.load().await, Err(EditorError::ResetInProgress)));
    assert!(matches!(
        client.reset_to_default().await,
        Err(EditorError::ResetInProgress)
    ));

    // The delete, then the reload that follows it.
    store.release(2);
    reset.await.unwrap().unwrap();

    assert_eq!(client.state(), SessionState::Ready);
    let working = client.working_copy().unwrap();
    assert!(!working.dirty);
    assert_eq!(working.document.cta_label, NavbarConfig::defaults().cta_label);
    assert!(store.memory().get(NavbarConfig::KIND).is_none());
}

#[tokio::test]
async fn save_signals_cache_invalidation() {
    let store = Arc::new(ScriptedStore::new());
    let (invalidator, mut invalidated) = RecordingInvalidator::new();
    let client = ConfigClient::new(Arc::new(ConfigPersistence::new(
        store,
        Arc::new(invalidator),
        Arc::new(MemoryNotifier::new()),
        ServicesConfig::defaults(),
    )));
    client.load().await.unwrap();
    client.modify(|doc| doc.autoplay = false).unwrap();
    client.save().await.unwrap();

    let kind = tokio::time::timeout(Duration::from_secs(1), invalidated.recv())
        .await
        .unwrap();
    assert_eq!(kind, Some(ServicesConfig::KIND));
}

// ---------------------------------------------------------------------------
// Single-flight load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn newer_load_cancels_the_one_in_flight() {
    let store = Arc::new(ScriptedStore::new());
    let persistence = Arc::new(ConfigPersistence::new(
        store.clone(),
        Arc::new(NoopInvalidator),
        Arc::new(MemoryNotifier::new()),
        NavbarConfig::defaults(),
    ));

    store.hold();
    let first = tokio::spawn({
        let persistence = persistence.clone();
        async move { persistence.load().await }
    });
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let second = tokio::spawn({
        let persistence = persistence.clone();
        async move { persistence.load().await }
    });

    assert_eq!(first.await.unwrap(), LoadOutcome::Cancelled);
    store.release(1);
    assert!(matches!(second.await.unwrap(), LoadOutcome::Loaded(_)));
}

#[tokio::test]
async fn superseded_session_load_changes_nothing() {
    let store = Arc::new(ScriptedStore::new());
    let client = session::<NavbarConfig>(store.clone(), Arc::new(MemoryNotifier::new()));

    store.hold();
    let first = tokio::spawn({
        let client = client.clone();
        async move { client.load().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = tokio::spawn({
        let client = client.clone();
        async move { client.load().await }
    });

    assert_eq!(first.await.unwrap().unwrap(), LoadStatus::Superseded);
    assert_eq!(client.state(), SessionState::Loading);

    store.release(1);
    assert_eq!(second.await.unwrap().unwrap(), LoadStatus::Loaded);
    assert_eq!(client.state(), SessionState::Ready);
}
