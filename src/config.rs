use std::time::Duration;

use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

const ENV_API_URL: &str = "STAY_FINDER_API_URL";
const ENV_TIMEOUT_SECS: &str = "STAY_FINDER_TIMEOUT_SECS";
const ENV_REDIRECT_DELAY_MS: &str = "STAY_FINDER_REDIRECT_DELAY_MS";
const ENV_LOG: &str = "STAY_FINDER_LOG";
const ENV_TOKEN: &str = "STAY_FINDER_TOKEN";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a whole number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid API url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Runtime settings for the client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base of the REST API, always ending in `/`
    pub api_url: Url,
    pub request_timeout: Duration,
    /// Pause between a successful booking and the jump to the bookings list
    pub redirect_delay: Duration,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    /// Bearer token of the signed-in tenant
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: parse_base_url(DEFAULT_API_URL).expect("default API url is valid"),
            request_timeout: DEFAULT_TIMEOUT,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            log_filter: "info".to_string(),
            token: None,
        }
    }
}

impl Config {
    /// Defaults overridden by `STAY_FINDER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_url = parse_base_url(&url)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &secs)?);
        }
        if let Some(ms) = lookup(ENV_REDIRECT_DELAY_MS) {
            config.redirect_delay = Duration::from_millis(parse_number(ENV_REDIRECT_DELAY_MS, &ms)?);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }
        config.token = lookup(ENV_TOKEN).filter(|token| !token.trim().is_empty());

        Ok(config)
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

/// Relative endpoint paths are joined onto this, so it needs a trailing slash
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "not a base url".to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
