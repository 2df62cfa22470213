use crate::session::{
    Session, SessionStore,
    error::{Result as SessionResult, SessionError},
};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Session store backed by a single JSON document on disk.
///
/// Token, refresh token and profile share one file, so a save either lands
/// completely or not at all.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames a corrupted session file to `<file>.corrupted.{timestamp}`.
    fn backup_corrupted(&self) -> Option<PathBuf> {
        let file_name = self.path.file_name()?.to_string_lossy().into_owned();
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self
            .path
            .with_file_name(format!("{file_name}.corrupted.{timestamp}"));

        match fs::rename(&self.path, &backup_path) {
            Ok(()) => {
                warn!("Backed up corrupted session to {backup_path:?}");
                Some(backup_path)
            }
            Err(e) => {
                warn!("Unable to back up corrupted session at {:?}: {e}", self.path);
                None
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    /// Returns:
    /// - `Ok(Some(..))` - loaded successfully
    /// - `Ok(None)` - no session file, or the file was corrupted (it is backed up)
    /// - `Err(..)` - the file exists but could not be read
    fn load(&self) -> SessionResult<Option<Session>> {
        if !self.path.exists() {
            debug!("No session file at {:?}", self.path);
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| SessionError::file_read(self.path.clone(), e))?;

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Session file corrupted at {:?}: {e}", self.path);
                self.backup_corrupted();
                Ok(None)
            }
        }
    }

    /// Temp file, fsync, then rename over the previous session.
    fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| SessionError::dir_creation(dir.to_path_buf(), e))?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("session.json"));
        let temp_path = self
            .path
            .with_file_name(format!("{file_name}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(session)?;

        if let Err(e) = write_synced(&temp_path, json.as_bytes()) {
            discard_temp(&temp_path);
            return Err(SessionError::file_write(temp_path, e));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            discard_temp(&temp_path);
            return Err(SessionError::atomic_rename(temp_path, self.path.clone(), e));
        }

        info!("Saved session to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared session at {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::file_remove(self.path.clone(), e)),
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Remove an abandoned temp file; failures are only logged.
fn discard_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Failed to remove temp session file {path:?}: {e}");
    }
}
