use anyhow::{Context, Result};
use directories::ProjectDirs;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const KEYRING_SERVICE: &str = "frota-cli";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Saved login. Username and API URL live in `session.toml` under the user's
/// config dir; the token itself goes to the OS keyring.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Session {
    #[serde(skip)]
    pub token: Option<String>,
    pub username: Option<String>,
    pub api_url: Option<String>,
}

impl Session {
    pub fn get_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "frota", "frota")
            .context("Could not determine config directory")?;
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join("session.toml"))
    }

    pub fn load() -> Result<Self> {
        let mut session = Self::load_from(&Self::get_path()?)?;

        if let Some(username) = &session.username {
            if let Ok(entry) = Entry::new(KEYRING_SERVICE, username.trim()) {
                if let Ok(token) = entry.get_password() {
                    session.token = Some(token);
                }
            }
        }

        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_path()?)?;

        if let Some(username) = &self.username {
            if let Ok(entry) = Entry::new(KEYRING_SERVICE, username.trim()) {
                match &self.token {
                    Some(token) => {
                        if let Err(e) = entry.set_password(token) {
                            log::warn!("Could not store token in keyring: {}", e);
                        }
                    }
                    None => {
                        let _ = entry.delete_credential();
                    }
                }
            }
        }

        Ok(())
    }

    /// Removes the keyring entry and the session file. Fine to call when not
    /// logged in.
    pub fn clear() -> Result<()> {
        let path = Self::get_path()?;
        if !path.exists() {
            return Ok(());
        }

        let session = Self::load_from(&path)?;
        if let Some(username) = session.username {
            if let Ok(entry) = Entry::new(KEYRING_SERVICE, username.trim()) {
                let _ = entry.delete_credential();
            }
        }

        fs::remove_file(path)?;
        Ok(())
    }

    /// Picks the API URL: explicit flag, then the saved session, then
    /// `FROTA_API_URL`, then localhost.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var("FROTA_API_URL").ok();
        pick_api_url(flag, self.api_url.as_deref(), env.as_deref())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let session = toml::from_str(&content)
            .with_context(|| format!("Corrupt session file at {}", path.display()))?;
        Ok(session)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn pick_api_url(flag: Option<&str>, saved: Option<&str>, env: Option<&str>) -> String {
    flag.or(saved)
        .or(env)
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}
