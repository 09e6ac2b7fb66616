//! Offline source reading endpoint payloads from a directory tree
//!
//! Layout mirrors the API: `<root>/messages/frequency.json`, optionally
//! overridden per group by `<root>/messages/frequency/<group>.json`.

use super::MetricSource;
use crate::error::FetchError;
use crate::models::GroupId;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

pub struct FixtureSource {
    root: PathBuf,
}

impl FixtureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File that answers `path` for `group`
    pub fn resolve(&self, path: &str, group: &GroupId) -> PathBuf {
        let endpoint = self.root.join(path.trim_start_matches('/'));
        let per_group = endpoint.join(format!("{}.json", group));
        if per_group.is_file() {
            per_group
        } else {
            endpoint.with_extension("json")
        }
    }
}

#[async_trait]
impl MetricSource for FixtureSource {
    async fn fetch_json(&self, path: &str, group: &GroupId) -> Result<Value, FetchError> {
        let file = self.resolve(path, group);
        let content = tokio::fs::read(&file)
            .await
            .map_err(|source| FetchError::Io {
                path: file.clone(),
                source,
            })?;

        debug!(path = %file.display(), group = %group, "Loaded fixture payload");

        serde_json::from_slice(&content).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("fixtures:{}", self.root.display())
    }
}
