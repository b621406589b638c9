//! File-backed session token storage.

use std::{fs, io::ErrorKind, path::PathBuf};

use courtside_core::TokenStore;

/// Token persisted as a single line in a file.
///
/// Read/write failures degrade to "no token" with a log line; the session
/// treats an absent token as a silent state.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the user's data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("courtside").join("token")
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() { None } else { Some(token.to_string()) }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "token read failed");
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %err, "token dir create failed");
                return;
            }
        }
        if let Err(err) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %err, "token write failed");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "token remove failed");
            }
        }
    }
}
