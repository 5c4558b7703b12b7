use std::{fs, io, io::ErrorKind, path::PathBuf, sync::Arc};

use crate::store::{AppState, Store};

/// Durable medium holding the one whole-snapshot blob.
pub trait SnapshotMedium: Send + Sync {
    /// Returns the stored blob, or `None` when nothing was ever persisted.
    fn read(&self) -> io::Result<Option<String>>;
    fn write(&self, raw: &str) -> io::Result<()>;
}

/// File-backed medium. Writes go through a tmp file plus rename so a crash
/// mid-write never leaves a truncated snapshot behind.
pub struct FileMedium {
    path: PathBuf,
}

impl FileMedium {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotMedium for FileMedium {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(source),
        }
    }

    fn write(&self, raw: &str) -> io::Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, raw)?;
        fs::rename(tmp_path, &self.path)
    }
}

/// Best-effort whole-snapshot persistence. Restore failures degrade to the
/// default state; write failures are logged and never propagated into the
/// foreground flow.
pub struct PersistenceGateway {
    medium: Arc<dyn SnapshotMedium>,
}

impl PersistenceGateway {
    pub fn new(medium: Arc<dyn SnapshotMedium>) -> Self {
        Self { medium }
    }

    pub fn restore(&self) -> AppState {
        let raw = match self.medium.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppState::default(),
            Err(error) => {
                tracing::warn!(error = %error, "snapshot unreadable, starting from defaults");
                return AppState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(error) => {
                tracing::warn!(error = %error, "snapshot shape mismatch, starting from defaults");
                AppState::default()
            }
        }
    }

    /// Registers the post-commit hook that mirrors every committed state to
    /// the medium. Called once at wiring time.
    pub fn attach(&self, store: &Store) {
        let medium = Arc::clone(&self.medium);
        store.on_commit(move |state| {
            let raw = match serde_json::to_string(state) {
                Ok(raw) => raw,
                Err(error) => {
                    tracing::warn!(error = %error, "snapshot serialization failed");
                    return;
                }
            };

            if let Err(error) = medium.write(&raw) {
                tracing::warn!(error = %error, "snapshot write failed");
            }
        });
    }
}
