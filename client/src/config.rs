use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com";

/// Connection settings for [`MarvelApi`](crate::transport::MarvelApi).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub public_key: String,
    pub private_key: String,
    /// Page size requested from every paginated endpoint.
    pub page_limit: u32,
    /// Upper bound on concurrent story detail fetches.
    pub story_concurrency: usize,
    pub request_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid value {value:?} for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            public_key: String::new(),
            private_key: String::new(),
            page_limit: 100,
            story_concurrency: 8,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                      |
    /// |---------------------------|------------------------------|
    /// | `MARVEL_BASE_URL`         | `https://gateway.marvel.com` |
    /// | `MARVEL_PUBLIC_KEY`       | empty                        |
    /// | `MARVEL_PRIVATE_KEY`      | empty                        |
    /// | `MARVEL_PAGE_LIMIT`       | `100`                        |
    /// | `STORY_FETCH_CONCURRENCY` | `8`                          |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            base_url: std::env::var("MARVEL_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            public_key: std::env::var("MARVEL_PUBLIC_KEY").unwrap_or_default(),
            private_key: std::env::var("MARVEL_PRIVATE_KEY").unwrap_or_default(),
            page_limit: parse_var("MARVEL_PAGE_LIMIT", defaults.page_limit)?,
            story_concurrency: parse_var("STORY_FETCH_CONCURRENCY", defaults.story_concurrency)?
                .max(1),
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { key, value }),
        Err(_) => Ok(default),
    }
}
