//! Personal book catalog with borrow/return history and best-effort
//! key-value persistence.
//!
//! # Examples
//!
//! Store usage with [`persist::memory::MemoryStorage`]:
//! ```
//! use booklog::{
//!     book::BookDraft,
//!     config::LibraryConfig,
//!     core::store::LibraryStore,
//!     persist::memory::MemoryStorage,
//!     types::BookStatus,
//! };
//!
//! let storage = MemoryStorage::new();
//! let mut store = LibraryStore::open(storage.clone(), &LibraryConfig::default());
//! assert_eq!(store.books().len(), 4);
//!
//! let id = store
//!     .add_book(BookDraft::new("Dune", "Frank Herbert", "Fiction"))
//!     .expect("valid draft");
//! assert_eq!(store.books()[0].id, id);
//! assert_eq!(store.toggle_borrow(id), Some(BookStatus::Borrowed));
//! assert!(storage.raw("booklib_history_v1").is_some());
//! ```
//!
//! Runtime usage with a SQLite medium and a recording display:
//! ```no_run
//! use booklog::{
//!     app::Library,
//!     book::BookDraft,
//!     config::LibraryConfig,
//!     core::store::LibraryStore,
//!     persist::sqlite::SqliteKvStorage,
//!     runtime::handle::spawn_library,
//!     view::RecordingSink,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = LibraryConfig::default();
//! let storage = SqliteKvStorage::open("library.db").expect("open sqlite");
//! let store = LibraryStore::open(storage, &config);
//! let handle = spawn_library(Library::new(store, Box::new(RecordingSink::new())), &config);
//! let id = handle
//!     .add_book(BookDraft::new("Dune", "Frank Herbert", "Fiction"))
//!     .await
//!     .expect("add");
//! handle.toggle_borrow(id).await.expect("toggle");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![warn(missing_docs)]

/// Command handlers over a store and a display sink.
pub mod app;
/// Book records, drafts, and history entries.
pub mod book;
/// Injectable wall clock.
pub mod clock;
/// Library configuration and storage keys.
pub mod config;
/// Core in-memory store and category set.
pub mod core;
/// Persistence adapter and key-value media.
pub mod persist;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
/// Catalog and history rendering.
pub mod view;
