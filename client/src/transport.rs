//! `reqwest` implementation of [`CatalogSource`] against the public comics API.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use heroes_shared::{Appearance, AppearanceType, Character, PagedResult, Story};
use md5::{Digest, Md5};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::SourceError;
use crate::source::CatalogSource;

/// Every response body is wrapped in a `data` envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

pub struct MarvelApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl MarvelApi {
    pub fn new(config: ApiConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent("heroes-client")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Reuse an existing client, e.g. to share a connection pool.
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.config.base_url, path);
        let ts = timestamp();
        let hash = signature(&ts, &self.config.private_key, &self.config.public_key);

        tracing::debug!(%url, ?query, "GET");

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("ts", ts.as_str()),
                ("apikey", self.config.public_key.as_str()),
                ("hash", hash.as_str()),
            ])
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode(&body)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
    ) -> Result<PagedResult<T>, SourceError> {
        query.push(("limit", self.config.page_limit.to_string()));
        self.get(path, &query).await
    }
}

#[async_trait]
impl CatalogSource for MarvelApi {
    async fn fetch_characters(&self, offset: u32) -> Result<PagedResult<Character>, SourceError> {
        self.get_page("/v1/public/characters", vec![("offset", offset.to_string())])
            .await
    }

    async fn fetch_character_by_id(&self, id: i64) -> Result<PagedResult<Character>, SourceError> {
        self.get(&format!("/v1/public/characters/{id}"), &[]).await
    }

    async fn search_characters_by_name(
        &self,
        name: &str,
    ) -> Result<PagedResult<Character>, SourceError> {
        self.get_page("/v1/public/characters", vec![("name", name.to_string())])
            .await
    }

    async fn fetch_appearance_page(
        &self,
        character_id: i64,
        kind: AppearanceType,
        offset: u32,
    ) -> Result<PagedResult<Appearance>, SourceError> {
        self.get_page(
            &format!("/v1/public/characters/{character_id}/{kind}"),
            vec![("offset", offset.to_string())],
        )
        .await
    }

    async fn fetch_story_detail(&self, story_id: i64) -> Result<Story, SourceError> {
        let page: PagedResult<Story> = self
            .get(&format!("/v1/public/stories/{story_id}"), &[])
            .await?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(format!("story {story_id}")))
    }
}

/// Unwrap the `data` envelope of a successful response body.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| SourceError::Decode(e.to_string()))
}

/// `md5(ts + private_key + public_key)` as lowercase hex.
pub fn signature(ts: &str, private_key: &str, public_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(ts.as_bytes());
    hasher.update(private_key.as_bytes());
    hasher.update(public_key.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(1)
        .to_string()
}
