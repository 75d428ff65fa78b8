use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.txt";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
pub const DEFAULT_PORT: u16 = 8000;

/// Server settings, read from the environment (and `.env`, loaded in `main`).
///
/// | Variable | Default |
/// |---|---|
/// | `JWT_SECRET` | required |
/// | `CREDENTIALS_FILE` | `credentials.txt` |
/// | `TOKEN_TTL_MINUTES` | 30 |
/// | `PORT` | 8000 |
/// | `SEED_DEMO_FLEET` | `true` |
#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub credentials_file: PathBuf,
    pub token_ttl: chrono::Duration,
    pub port: u16,
    pub seed_demo_fleet: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes `std::env::var`;
    /// tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // No default for the signing secret.
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET must be set")?;

        let credentials_file = lookup("CREDENTIALS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE));

        let ttl_minutes = match lookup("TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("TOKEN_TTL_MINUTES is not a number: {raw}"))?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        if ttl_minutes <= 0 {
            bail!("TOKEN_TTL_MINUTES must be greater than zero");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let seed_demo_fleet = match lookup("SEED_DEMO_FLEET") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("SEED_DEMO_FLEET must be true or false: {raw}"))?,
            None => true,
        };

        Ok(Self {
            jwt_secret,
            credentials_file,
            token_ttl: chrono::Duration::minutes(ttl_minutes),
            port,
            seed_demo_fleet,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.credentials_file, PathBuf::from("credentials.txt"));
        assert_eq!(config.token_ttl, chrono::Duration::minutes(30));
        assert_eq!(config.port, 8000);
        assert!(config.seed_demo_fleet);
    }

    #[test]
    fn missing_or_empty_secret_is_an_error() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("JWT_SECRET", "")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("JWT_SECRET", "x"),
            ("CREDENTIALS_FILE", "/etc/frota/users.txt"),
            ("TOKEN_TTL_MINUTES", "5"),
            ("PORT", "3000"),
            ("SEED_DEMO_FLEET", "false"),
        ])
        .unwrap();

        assert_eq!(config.credentials_file, PathBuf::from("/etc/frota/users.txt"));
        assert_eq!(config.token_ttl, chrono::Duration::minutes(5));
        assert_eq!(config.port, 3000);
        assert!(!config.seed_demo_fleet);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(config_from(&[("JWT_SECRET", "x"), ("TOKEN_TTL_MINUTES", "0")]).is_err());
        assert!(config_from(&[("JWT_SECRET", "x"), ("TOKEN_TTL_MINUTES", "abc")]).is_err());
        assert!(config_from(&[("JWT_SECRET", "x"), ("PORT", "99999")]).is_err());
        assert!(config_from(&[("JWT_SECRET", "x"), ("SEED_DEMO_FLEET", "maybe")]).is_err());
    }
}
