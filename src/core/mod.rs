//! In-memory authoritative store and category registry.

/// Explicit set of selectable categories.
pub mod categories;
/// Authoritative book/history store.
pub mod store;
