//! Library configuration.

use serde::Deserialize;

/// Storage key for the serialized book list. The suffix is the schema version.
pub const BOOKS_KEY: &str = "booklib_books_v1";
/// Storage key for the serialized history log.
pub const HISTORY_KEY: &str = "booklib_history_v1";
/// Default `chrono` format for history timestamps, e.g. `10/19/2026, 2:05:09 PM`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Tunables shared by the store and the runtime.
///
/// Missing fields fall back to [`LibraryConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Key holding the book list.
    pub books_key: String,
    /// Key holding the history log.
    pub history_key: String,
    /// `chrono` strftime pattern for history dates.
    pub date_format: String,
    /// Capacity of the runtime command queue.
    pub command_queue_bound: usize,
    /// Capacity of the runtime event broadcast.
    pub event_queue_bound: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            books_key: BOOKS_KEY.to_string(),
            history_key: HISTORY_KEY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            command_queue_bound: 64,
            event_queue_bound: 256,
        }
    }
}

impl LibraryConfig {
    /// Parses a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
