use std::time::Duration;

use booklog::{
    app::Library,
    book::BookDraft,
    config::{HISTORY_KEY, LibraryConfig},
    core::store::LibraryStore,
    persist::memory::MemoryStorage,
    runtime::{
        events::LibraryEvent,
        handle::{LibraryHandle, RuntimeError, spawn_library},
    },
    types::{ALL_CATEGORIES, BookStatus, HistoryAction},
    view::{CatalogView, RecordingSink},
};

fn spawn(storage: &MemoryStorage) -> (LibraryHandle, RecordingSink) {
    let config = LibraryConfig::default();
    let store = LibraryStore::open(storage.clone(), &config);
    let sink = RecordingSink::new();
    let handle = spawn_library(Library::new(store, Box::new(sink.clone())), &config);
    (handle, sink)
}

#[tokio::test]
async fn runtime_add_toggle_and_events_ordered() {
    let storage = MemoryStorage::new();
    let (handle, sink) = spawn(&storage);
    let mut sub = handle.subscribe();

    let id = handle
        .add_book(BookDraft::new("Dune", "Frank Herbert", "Fiction"))
        .await
        .expect("add");
    assert_eq!(handle.toggle_borrow(id).await.expect("toggle"), Some(BookStatus::Borrowed));
    assert_eq!(handle.toggle_borrow(id).await.expect("toggle"), Some(BookStatus::Available));

    let mut seen = Vec::new();
    for _ in 0..3 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        seen.push(evt);
    }
    assert_eq!(seen[0], LibraryEvent::BookAdded { id });
    assert_eq!(
        seen[1],
        LibraryEvent::StatusChanged { id, status: BookStatus::Borrowed }
    );
    assert_eq!(
        seen[2],
        LibraryEvent::StatusChanged { id, status: BookStatus::Available }
    );

    let history = handle.history().await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action, HistoryAction::Returned);
    assert_eq!(history[1].action, HistoryAction::Borrowed);
    assert_eq!(sink.history().expect("history view").lines().len(), 2);
    assert!(storage.raw(HISTORY_KEY).is_some());

    let snapshot = handle.shutdown().await.expect("shutdown");
    assert_eq!(snapshot.books.len(), 5);
    assert_eq!(snapshot.books[0].id, id);
}

#[tokio::test]
async fn runtime_rejects_invalid_draft() {
    let storage = MemoryStorage::new();
    let (handle, sink) = spawn(&storage);
    let mut sub = handle.subscribe();

    let res = handle.add_book(BookDraft::new("Dune", "", "Fiction")).await;
    assert!(matches!(res, Err(RuntimeError::Validation(_))));

    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv");
    assert_eq!(evt, LibraryEvent::ValidationFailed);
    assert_eq!(sink.alerts().len(), 1);
    assert_eq!(handle.books().await.expect("books").len(), 4);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_filters_drive_catalog_view() {
    let storage = MemoryStorage::new();
    let (handle, sink) = spawn(&storage);

    handle.search("martin").await.expect("search");
    let view = handle.catalog_view().await.expect("view");
    assert_eq!(view.cards().len(), 1);
    assert_eq!(view.cards()[0].title, "Clean Code");
    assert_eq!(sink.catalog(), Some(view));

    handle.set_category("Fiction").await.expect("category");
    assert_eq!(
        handle.catalog_view().await.expect("view"),
        CatalogView::Empty { message: "No books found." }
    );

    handle.clear_filters().await.expect("clear");
    let filter = handle.filter().await.expect("filter");
    assert_eq!(filter.query, "");
    assert_eq!(filter.category, ALL_CATEGORIES);
    assert_eq!(handle.catalog_view().await.expect("view").cards().len(), 4);
    assert!(storage.is_empty());

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn calls_after_shutdown_report_closed_channel() {
    let storage = MemoryStorage::new();
    let (handle, _sink) = spawn(&storage);
    handle.shutdown().await.expect("shutdown");

    let res = handle.toggle_borrow(1).await;
    assert!(matches!(res, Err(RuntimeError::ChannelClosed)));
}

#[tokio::test]
async fn unknown_toggle_emits_nothing() {
    let storage = MemoryStorage::new();
    let (handle, _sink) = spawn(&storage);
    let mut sub = handle.subscribe();

    assert_eq!(handle.toggle_borrow(42).await.expect("toggle"), None);
    handle.search("").await.expect("search");

    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv");
    assert!(matches!(evt, LibraryEvent::FiltersChanged { .. }));

    handle.shutdown().await.expect("shutdown");
}
