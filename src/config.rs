// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_READ_RETRIES: u32 = 1;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Tally", "tally"));

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("API URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),

    #[error("could not determine platform-specific data dir")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every resource path is appended to, without a trailing slash.
    pub api_url: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
    /// Extra attempts for reads that fail before reaching the server.
    pub read_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = normalize_api_url(
            &lookup("TALLY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let data_dir = match lookup("TALLY_DATA_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        let timeout_secs: u64 =
            parse_number("TALLY_TIMEOUT_SECS", lookup("TALLY_TIMEOUT_SECS"))?
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let read_retries: u32 =
            parse_number("TALLY_READ_RETRIES", lookup("TALLY_READ_RETRIES"))?
                .unwrap_or(DEFAULT_READ_RETRIES);

        Ok(Config {
            api_url,
            data_dir,
            timeout: Duration::from_secs(timeout_secs),
            read_retries,
        })
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(url)?;
        Ok(self)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("tally.sqlite")
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(ConfigError::NoDataDir)?;
    Ok(proj.data_dir().to_path_buf())
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(url.to_string())
}

/// Parses into `T` directly, so values out of its range are rejected.
fn parse_number<T: FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::from_lookup(lookup(&[("TALLY_DATA_DIR", "/tmp/tally")])).unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert_eq!(cfg.read_retries, 1);
        assert_eq!(cfg.db_path(), PathBuf::from("/tmp/tally/tally.sqlite"));
    }

    #[test]
    fn api_url_trailing_slash_is_trimmed() {
        let cfg = Config::from_lookup(lookup(&[
            ("TALLY_DATA_DIR", "/tmp/tally"),
            ("TALLY_API_URL", "https://money.example.com/api/v1/"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "https://money.example.com/api/v1");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("TALLY_DATA_DIR", "/tmp/tally"),
            ("TALLY_READ_RETRIES", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "TALLY_READ_RETRIES",
                value: "lots".into()
            }
        );
    }

    #[test]
    fn relative_api_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("TALLY_DATA_DIR", "/tmp/tally"),
            ("TALLY_API_URL", "/api/v1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl(_)));
    }

    #[test]
    fn retries_beyond_u32_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("TALLY_DATA_DIR", "/tmp/tally"),
            ("TALLY_READ_RETRIES", "4294967296"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "TALLY_READ_RETRIES",
                value: "4294967296".into()
            }
        );
    }
}
