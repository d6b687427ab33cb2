// src/config/options.rs
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::consts::*;
use crate::error::Result;

/// Run configuration, read from `config.json`.
///
/// ```json
/// {
///     "max_jobs": 50,
///     "linkedin_email": "you@example.com",
///     "linkedin_password": "…"
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "max_jobs", deserialize_with = "de_count")]
    pub max_jobs_per_source: usize,
    pub linkedin_email: Option<String>,
    pub linkedin_password: Option<String>,
    pub sheet_path: PathBuf,
    pub seen_links_path: PathBuf,
    pub page_delay_ms: u64,
    pub max_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_jobs_per_source: DEFAULT_MAX_JOBS,
            linkedin_email: None,
            linkedin_password: None,
            sheet_path: PathBuf::from(DEFAULT_SHEET_FILE),
            seen_links_path: PathBuf::from(DEFAULT_SEEN_FILE),
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

// Password stays out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("max_jobs_per_source", &self.max_jobs_per_source)
            .field("linkedin_email", &self.linkedin_email)
            .field("linkedin_password", &self.linkedin_password.as_ref().map(|_| "***"))
            .field("sheet_path", &self.sheet_path)
            .field("seen_links_path", &self.seen_links_path)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Load from `path`. A missing, unreadable or malformed file never
    /// fails the run: the problem is logged and defaults are returned.
    pub fn load(path: &Path) -> Config {
        if !path.exists() {
            logd!("No config at {}; using defaults", path.display());
            return Config::default();
        }
        match Self::try_load(path) {
            Ok(cfg) => {
                logd!("Loaded config {:?}", cfg);
                cfg
            }
            Err(e) => {
                logw!(
                    "Could not read {}, using default max_jobs={}: {e}",
                    path.display(),
                    DEFAULT_MAX_JOBS
                );
                Config::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Config> {
        Ok(serde_json::from_str(text)?)
    }

    /// LinkedIn login, only when both halves are present.
    pub fn credentials(&self) -> Option<Credentials> {
        let email = self.linkedin_email.as_deref().map(str::trim).unwrap_or("");
        let password = self.linkedin_password.as_deref().unwrap_or("");
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some(Credentials { email: s!(email), password: s!(password) })
    }
}

/// Accept `50` as well as `"50"`.
fn de_count<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<usize, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Num(usize),
        Text(String),
    }
    match Count::deserialize(d)? {
        Count::Num(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
