//! Analytics API client
//!
//! `GET {base_url}/graphs/<path>?group_id=<id>` with an optional short-lived
//! response cache that also coalesces identical in-flight requests.

use super::MetricSource;
use crate::error::FetchError;
use crate::models::GroupId;
use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Settings for [`HttpSource`]
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Server root, without the `/graphs` suffix
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Response reuse window; zero disables the cache
    pub cache_ttl: Duration,

    /// Maximum cached responses
    pub cache_capacity: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            cache_ttl: Duration::ZERO,
            cache_capacity: 256,
        }
    }
}

/// HTTP-backed metric source
pub struct HttpSource {
    client: Client,
    base_url: String,
    cache: Option<Cache<String, Arc<Value>>>,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("groupboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Network {
                url: base_url.clone(),
                source,
            })?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            client,
            base_url,
            cache,
        })
    }

    /// Full endpoint URL, without the query string
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/graphs/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, path: &str, group: &GroupId) -> Result<Value, FetchError> {
        let url = self.endpoint_url(path);
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(&[("group_id", group.as_str())])
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        debug!(
            %url,
            group = %group,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched metric payload"
        );

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl MetricSource for HttpSource {
    async fn fetch_json(&self, path: &str, group: &GroupId) -> Result<Value, FetchError> {
        let Some(cache) = &self.cache else {
            return self.request(path, group).await;
        };

        let key = format!("{}?group_id={}", path, group);
        trace!(%key, "Cache lookup");

        cache
            .try_get_with(key, async { self.request(path, group).await.map(Arc::new) })
            .await
            .map(|value| (*value).clone())
            .map_err(|shared| {
                Arc::try_unwrap(shared).unwrap_or_else(|shared| FetchError::Shared {
                    message: shared.to_string(),
                })
            })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
