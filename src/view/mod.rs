//! Pure projections of store state into display models.

/// Catalog and history renderers.
pub mod render;
/// Display sink trait and a recording implementation.
pub mod sink;

pub use render::{BookCard, CatalogFilter, CatalogView, HistoryView, StatusBadge};
pub use sink::{DisplaySink, RecordingSink};
