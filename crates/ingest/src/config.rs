use std::time::Duration;

use crate::sync::SyncOptions;

/// Public MFDS endpoint serving the easy-drug-info list.
pub const DEFAULT_FEED_URL: &str =
    "http://apis.data.go.kr/1471000/DrbEasyDrugInfoService/getDrbEasyDrugList";

const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 2000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IngestConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a positive number, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Feed ingestor configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Decoded data.go.kr service key; it is URL-encoded on every request.
    pub service_key: String,
    pub feed_url: String,
    pub page_size: u32,
    pub page_delay_ms: u64,
    pub http_timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    /// `None` runs a single sync and exits.
    pub sync_interval_secs: Option<u64>,
}

impl IngestConfig {
    /// Load settings from environment variables.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `MFDS_SERVICE_KEY`       | -- (required)               |
    /// | `MFDS_FEED_URL`          | [`DEFAULT_FEED_URL`]        |
    /// | `FEED_PAGE_SIZE`         | `100`                       |
    /// | `FEED_PAGE_DELAY_MS`     | `1000`                      |
    /// | `FEED_HTTP_TIMEOUT_SECS` | `60`                        |
    /// | `FEED_MAX_ATTEMPTS`      | `3`                         |
    /// | `FEED_RETRY_BACKOFF_MS`  | `2000`                      |
    /// | `SYNC_INTERVAL_SECS`     | unset (one-shot)            |
    pub fn from_env() -> Result<Self, IngestConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`IngestConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IngestConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_key = lookup("MFDS_SERVICE_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(IngestConfigError::Missing("MFDS_SERVICE_KEY"))?;

        let feed_url = lookup("MFDS_FEED_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        let sync_interval_secs = match lookup("SYNC_INTERVAL_SECS") {
            Some(value) if !value.is_empty() => Some(positive("SYNC_INTERVAL_SECS", value)?),
            _ => None,
        };

        Ok(Self {
            service_key,
            feed_url,
            page_size: positive_or(&lookup, "FEED_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            page_delay_ms: number_or(&lookup, "FEED_PAGE_DELAY_MS", DEFAULT_PAGE_DELAY_MS)?,
            http_timeout_secs: positive_or(
                &lookup,
                "FEED_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            max_attempts: positive_or(&lookup, "FEED_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            retry_backoff_ms: number_or(&lookup, "FEED_RETRY_BACKOFF_MS", DEFAULT_RETRY_BACKOFF_MS)?,
            sync_interval_secs,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn sync_interval(&self) -> Option<Duration> {
        self.sync_interval_secs.map(Duration::from_secs)
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            page_size: self.page_size,
            page_delay: Duration::from_millis(self.page_delay_ms),
            max_attempts: self.max_attempts,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

fn number_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, IngestConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| IngestConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn positive_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, IngestConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    match lookup(name) {
        Some(value) => positive(name, value),
        None => Ok(default),
    }
}

fn positive<T>(name: &'static str, value: String) -> Result<T, IngestConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(IngestConfigError::Invalid { name, value }),
    }
}
