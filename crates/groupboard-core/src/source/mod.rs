//! Where metric payloads come from
//!
//! Panels only see [`MetricSource`]; the HTTP API and on-disk fixtures are
//! interchangeable behind it.

mod fixture;
mod http;

pub use fixture::FixtureSource;
pub use http::{HttpSource, HttpSourceConfig};

use crate::error::FetchError;
use crate::models::GroupId;
use async_trait::async_trait;

/// Retrieves the raw JSON document of one endpoint for one group
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// `path` is relative to `graphs/`, e.g. `messages/frequency`
    async fn fetch_json(
        &self,
        path: &str,
        group: &GroupId,
    ) -> Result<serde_json::Value, FetchError>;

    /// Human-readable origin for headers and logs
    fn describe(&self) -> String;
}
