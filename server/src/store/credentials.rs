use crate::utils::validation::validate_username;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to access credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed line {line} in credentials file {path}: expected 'username:hash'")]
    Malformed { path: PathBuf, line: usize },

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("invalid username: {0}")]
    InvalidUsername(String),
}

/// Flat-file credential store.
///
/// One user per line, `username:hashed_password`. The file is re-read on every
/// call; there is no cache and no file locking, so two concurrent `append`s for
/// the same name can both succeed.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every user into a map of username -> hash.
    ///
    /// A missing file is an empty store. Blank lines are skipped, but any other
    /// line without a ':' fails the whole load.
    pub fn load(&self) -> Result<HashMap<String, String>, CredentialError> {
        match self.read_raw()? {
            Some(content) => self.parse(&content),
            None => Ok(HashMap::new()),
        }
    }

    /// Looks up the stored hash for one user.
    pub fn get(&self, username: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.load()?.remove(username))
    }

    /// Adds a user. Fails if the username is already taken.
    pub fn append(&self, username: &str, hashed_password: &str) -> Result<(), CredentialError> {
        validate_username(username).map_err(CredentialError::InvalidUsername)?;

        let existing = self.read_raw()?;
        if let Some(content) = &existing {
            if self.parse(content)?.contains_key(username) {
                return Err(CredentialError::UserExists(username.to_string()));
            }
        }

        // Someone may have edited the file by hand and dropped the trailing newline.
        let needs_newline = existing
            .as_deref()
            .is_some_and(|c| !c.is_empty() && !c.ends_with('\n'));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut line = String::new();
        if needs_newline {
            line.push('\n');
        }
        line.push_str(username);
        line.push(':');
        line.push_str(hashed_password);
        line.push('\n');

        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error(e))?;

        tracing::info!(username, path = %self.path.display(), "Added user to credentials file");
        Ok(())
    }

    fn read_raw(&self) -> Result<Option<String>, CredentialError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn parse(&self, content: &str) -> Result<HashMap<String, String>, CredentialError> {
        let mut users = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            // First colon only: everything after it belongs to the hash.
            let Some((username, hash)) = line.split_once(':') else {
                return Err(CredentialError::Malformed {
                    path: self.path.clone(),
                    line: idx + 1,
                });
            };

            users.insert(username.to_string(), hash.to_string());
        }

        Ok(users)
    }

    fn io_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("credentials.txt"))
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.get("user3").unwrap(), None);
    }

    #[test]
    fn append_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append("user3", "$argon2id$abc").unwrap();
        store.append("user4", "$2b$12$xyz").unwrap();

        let users = store.load().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users["user3"], "$argon2id$abc");
        assert_eq!(users["user4"], "$2b$12$xyz");

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "user3:$argon2id$abc\nuser4:$2b$12$xyz\n");
    }

    #[test]
    fn duplicate_user_is_rejected_and_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append("user3", "first").unwrap();

        let err = store.append("user3", "second").unwrap_err();
        assert!(matches!(err, CredentialError::UserExists(ref u) if u == "user3"));
        assert_eq!(store.get("user3").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn splits_on_first_colon_only() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "ana:abc:def\r\n\n  \nbob:xyz\n").unwrap();

        let users = store.load().unwrap();
        assert_eq!(users["ana"], "abc:def");
        assert_eq!(users["bob"], "xyz");
    }

    #[test]
    fn malformed_line_fails_the_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "ana:abc\nno-colon-here\n").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, CredentialError::Malformed { line: 2, .. }));
    }

    #[test]
    fn append_repairs_missing_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "ana:abc").unwrap();

        store.append("bob", "xyz").unwrap();

        let users = store.load().unwrap();
        assert_eq!(users["ana"], "abc");
        assert_eq!(users["bob"], "xyz");
    }

    #[test]
    fn username_with_separator_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = store.append("ana:x", "hash").unwrap_err();
        assert!(matches!(err, CredentialError::InvalidUsername(_)));
        assert!(!store.path().exists());
    }

    #[test]
    fn padded_username_cannot_shadow_an_existing_user() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append("ana", "hash-of-ana").unwrap();

        for padded in [" ana", "ana ", "\tana"] {
            let err = store.append(padded, "hash-of-someone-else").unwrap_err();
            assert!(matches!(err, CredentialError::InvalidUsername(_)));
        }

        assert_eq!(store.get("ana").unwrap().as_deref(), Some("hash-of-ana"));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn unreadable_file_is_an_io_error_not_an_empty_store() {
        let dir = TempDir::new().unwrap();
        // A directory exists at the path, so reading fails with something other than NotFound.
        let store = CredentialStore::new(dir.path());

        assert!(matches!(store.load(), Err(CredentialError::Io { .. })));
        assert!(matches!(store.get("ana"), Err(CredentialError::Io { .. })));
    }
}
