//! JSON snapshot persistence, one file per workspace.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::{AppError, Snapshot};
use crate::ports::StateStore;

/// Hex characters of the workspace digest used as the file stem.
const KEY_LEN: usize = 16;

/// Stores the form snapshot of one workspace under a state directory.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn for_workspace(state_dir: &Path, workspace: &Path) -> Self {
        Self { path: state_dir.join(format!("{}.json", workspace_key(workspace))) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence_error(&self, reason: impl ToString) -> AppError {
        AppError::Persistence { path: self.path.display().to_string(), reason: reason.to_string() }
    }
}

/// Stable identity of a workspace directory.
pub fn workspace_key(workspace: &Path) -> String {
    let canonical = workspace.canonicalize().unwrap_or_else(|_| workspace.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    let hex = format!("{:x}", digest);
    hex[..KEY_LEN].to_string()
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<Snapshot>, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No saved state");
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.persistence_error(e))?;
        match serde_json::from_str::<Snapshot>(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Discarding unreadable state");
                Ok(None)
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), AppError> {
        let dir = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir).map_err(|e| self.persistence_error(e))?;

        let mut stamped = snapshot.clone();
        stamped.saved_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(&stamped)?;

        // Same-directory temp file so the rename stays on one filesystem.
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.persistence_error(e))?;
        temp.write_all(json.as_bytes()).map_err(|e| self.persistence_error(e))?;
        temp.flush().map_err(|e| self.persistence_error(e))?;
        temp.persist(&self.path).map_err(|e| self.persistence_error(e.error))?;

        debug!(path = %self.path.display(), mode = %snapshot.mode, step = snapshot.step, "State saved");
        Ok(())
    }
}
