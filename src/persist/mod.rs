pub mod memory;
pub mod sqlite;

use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug)]
pub enum PersistError {
    Sqlite(rusqlite::Error),
    Serde(serde_json::Error),
    QuotaExceeded { key: String, needed: usize, quota: usize },
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Durable string key-value medium provided by the host.
pub trait KvStorage: Send {
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
    fn remove(&mut self, _key: &str) -> PersistResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOp {
    Save,
    Load,
}

/// A persistence failure that was swallowed.
#[derive(Debug)]
pub struct PersistDiagnostic {
    pub op: PersistOp,
    pub key: String,
    pub error: PersistError,
}

pub type DiagnosticHook = Box<dyn Fn(&PersistDiagnostic) + Send + Sync>;

/// Best-effort JSON bridge between in-memory collections and a [`KvStorage`].
///
/// Neither [`save`](Self::save) nor [`load`](Self::load) ever fails: errors are
/// logged, handed to the optional diagnostic hook, and then dropped.
pub struct PersistenceAdapter {
    storage: Box<dyn KvStorage>,
    on_failure: Option<DiagnosticHook>,
}

impl PersistenceAdapter {
    pub fn new(storage: Box<dyn KvStorage>) -> Self {
        Self {
            storage,
            on_failure: None,
        }
    }

    /// Installs a callback invoked for every swallowed failure.
    pub fn with_diagnostics(
        mut self,
        hook: impl Fn(&PersistDiagnostic) + Send + Sync + 'static,
    ) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(error) = self.try_save(key, value) {
            self.report(PersistOp::Save, key, error);
        }
    }

    /// Returns `None` on a missing key and on unreadable or malformed content.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(error) => {
                self.report(PersistOp::Load, key, error);
                None
            }
        }
    }

    fn try_save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> PersistResult<()> {
        let text = serde_json::to_string(value)?;
        self.storage.set(key, &text)
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> PersistResult<Option<T>> {
        let Some(text) = self.storage.get(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn report(&self, op: PersistOp, key: &str, error: PersistError) {
        tracing::warn!(?op, key, ?error, "persistence failure ignored");
        if let Some(hook) = &self.on_failure {
            hook(&PersistDiagnostic {
                op,
                key: key.to_string(),
                error,
            });
        }
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("diagnostics", &self.on_failure.is_some())
            .finish_non_exhaustive()
    }
}
