use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Token file name in the data directory
const TOKEN_FILE: &str = "token";

/// File-backed storage for the bearer credential.
///
/// The token is written on login and removed on logout, so it survives
/// process restarts in between. Reads are best-effort: any I/O failure is
/// treated as "no credential" so a corrupt or unreadable file never blocks
/// startup.
pub struct TokenStore {
    data_dir: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// The persisted credential, if any
    pub fn get(&self) -> Option<String> {
        match std::fs::read_to_string(self.token_path()) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    debug!(error = %e, "Failed to read token file");
                }
                None
            }
        }
    }

    /// Persist the credential, replacing any previous value.
    /// Surrounding whitespace is not part of a credential and is stripped,
    /// so `get` hands back exactly what was stored.
    pub fn set(&self, token: &str) -> Result<()> {
        let path = self.token_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create token directory")?;
        }
        std::fs::write(&path, token.trim()).context("Failed to write token file")?;
        Ok(())
    }

    /// Remove the credential. Clearing an absent credential is a no-op.
    pub fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove token file")?;
        }
        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_returns_none_when_absent() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        store.set("abc.def.ghi").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_set_strips_surrounding_whitespace() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        store.set("  abc.def.ghi\n").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("token")).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn test_set_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("data"));
        store.set("tok").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok"));
    }

    #[test]
    fn test_clear_removes_token() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        store.set("tok").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_clear_without_token_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_whitespace_only_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("token"), "  \n").unwrap();
        assert_eq!(store.get(), None);
    }
}
