//! The state file the watcher reads at startup and rewrites after each poll.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use super::snapshot::{
    PersistedState, Result, SnapshotError, save_snapshot_atomic, try_load_snapshot,
};
use crate::state::Ledger;

/// Suffix appended to a state file that could not be parsed.
pub const CORRUPT_SUFFIX: &str = "corrupt";

/// Handle on the durable state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger. A missing file is an empty ledger.
    pub fn load(&self) -> Result<Ledger> {
        Ok(try_load_snapshot(&self.path)?
            .map(Ledger::from)
            .unwrap_or_default())
    }

    /// Loads the ledger, starting empty if the file is unreadable.
    ///
    /// An unparseable file is renamed to `<file>.corrupt` so it can be
    /// inspected and is not overwritten by the next save. A file that cannot
    /// be read at all stays where it is. Starting empty is quiet: every
    /// collection goes through its bootstrap poll again.
    pub fn load_or_recover(&self) -> Ledger {
        match self.load() {
            Ok(ledger) => {
                debug!(path = %self.path.display(), "Loaded state");
                ledger
            }
            Err(SnapshotError::Io(e)) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "State file could not be read, starting from empty state"
                );
                Ledger::default()
            }
            Err(e @ SnapshotError::Json(_)) => {
                let mut aside = self.path.as_os_str().to_owned();
                aside.push(format!(".{CORRUPT_SUFFIX}"));
                let aside = PathBuf::from(aside);

                warn!(
                    path = %self.path.display(),
                    error = %e,
                    moved_to = %aside.display(),
                    "State file corrupt, starting from empty state"
                );
                if let Err(rename_err) = std::fs::rename(&self.path, &aside) {
                    error!(error = %rename_err, "Could not move corrupt state file aside");
                }
                Ledger::default()
            }
        }
    }

    /// Rewrites the whole state file atomically.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        save_snapshot_atomic(&self.path, &PersistedState::from(ledger))
    }
}
