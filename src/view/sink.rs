use std::sync::{Arc, Mutex};

use super::render::{CatalogView, HistoryView};

/// Receives rendered output. Implemented by the host's display layer.
pub trait DisplaySink: Send {
    fn show_catalog(&mut self, view: &CatalogView);
    fn show_history(&mut self, view: &HistoryView);
    /// Blocking user-visible notice, e.g. a validation failure.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Default)]
struct Recorded {
    catalog: Option<CatalogView>,
    history: Option<HistoryView>,
    alerts: Vec<String>,
    catalog_renders: usize,
    history_renders: usize,
}

/// Sink that keeps the latest output. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> Option<CatalogView> {
        self.inner.lock().ok().and_then(|r| r.catalog.clone())
    }

    pub fn history(&self) -> Option<HistoryView> {
        self.inner.lock().ok().and_then(|r| r.history.clone())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|r| r.alerts.clone())
            .unwrap_or_default()
    }

    /// `(catalog, history)` render counts.
    pub fn render_counts(&self) -> (usize, usize) {
        self.inner
            .lock()
            .map(|r| (r.catalog_renders, r.history_renders))
            .unwrap_or_default()
    }
}

impl DisplaySink for RecordingSink {
    fn show_catalog(&mut self, view: &CatalogView) {
        if let Ok(mut r) = self.inner.lock() {
            r.catalog = Some(view.clone());
            r.catalog_renders += 1;
        }
    }

    fn show_history(&mut self, view: &HistoryView) {
        if let Ok(mut r) = self.inner.lock() {
            r.history = Some(view.clone());
            r.history_renders += 1;
        }
    }

    fn alert(&mut self, message: &str) {
        if let Ok(mut r) = self.inner.lock() {
            r.alerts.push(message.to_string());
        }
    }
}
