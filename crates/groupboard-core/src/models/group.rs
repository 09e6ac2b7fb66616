//! Group identifier

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque key of the community/chat group a metric is scoped to.
///
/// The API accepts both numeric and string ids; both are kept as strings
/// and sent verbatim as the `group_id` query parameter. Config files may
/// write either `42` or `"42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawGroupId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawGroupId::deserialize(deserializer)? {
            RawGroupId::Text(id) => GroupId::from(id),
            RawGroupId::Signed(id) => GroupId::from(id),
            RawGroupId::Unsigned(id) => GroupId::from(id),
        })
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id.trim())
    }
}

impl From<String> for GroupId {
    fn from(id: String) -> Self {
        Self::new(id.trim())
    }
}

impl From<u64> for GroupId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for GroupId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}
