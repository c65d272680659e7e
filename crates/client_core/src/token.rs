use std::{io::ErrorKind, path::PathBuf};

use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::error::Result;

/// Holds the session token sent with every request. When backed by a file the
/// token survives restarts, the way a browser keeps it in local storage.
pub struct TokenStore {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: RwLock::new(None),
        }
    }

    /// Opens a file-backed store, picking up a token saved by an earlier run.
    /// A missing file means no token.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let token = match fs::read_to_string(&path).await {
            Ok(raw) => Some(raw.trim().to_string()).filter(|token| !token.is_empty()),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), has_token = token.is_some(), "opened token store");

        Ok(Self {
            path: Some(path),
            token: RwLock::new(token),
        })
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn save(&self, token: &str) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            fs::write(path, token).await?;
        }
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    pub async fn drop_token(&self) -> Result<()> {
        *self.token.write().await = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
