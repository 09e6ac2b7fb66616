//! Metric catalog: one typed response contract and one pure adapter per endpoint
//!
//! Each endpoint lives at `graphs/<domain>/<metric>` and is scoped by the
//! `group_id` query parameter. Adding a chart means adding a [`Metric`] impl
//! and a [`MetricId`] variant, nothing else.

pub mod bots;
pub mod members;
pub mod messages;

use crate::error::{FetchError, ShapeError};
use crate::models::{ChartKind, GroupId, Visual};
use crate::source::MetricSource;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub use bots::TopBots;
pub use members::{ActiveInactive, MemberGrowth, TopRepliers, TopSenders};
pub use messages::{HourlyActivity, MessageFrequency, MessageTypes, ResponseTime, WeekdayActivity};

/// A typed endpoint contract
pub trait Metric {
    /// Exact JSON shape the endpoint returns
    type Response: DeserializeOwned;

    const ID: MetricId;

    /// Pure mapping from payload to chart shape
    fn adapt(response: &Self::Response) -> Result<Visual, ShapeError>;
}

/// BigQuery-style wrapped date: `{"value": "2024-01-01"}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateValue {
    pub value: String,
}

/// Dashboard section an endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Messages,
    Members,
    Bots,
}

impl Domain {
    pub fn all() -> &'static [Domain] {
        &[Domain::Messages, Domain::Members, Domain::Bots]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Messages => "Messages",
            Domain::Members => "Members",
            Domain::Bots => "Bots",
        }
    }

    /// Metrics shown on this domain's tab, in display order
    pub fn metrics(&self) -> Vec<MetricId> {
        MetricId::all()
            .iter()
            .copied()
            .filter(|m| m.domain() == *self)
            .collect()
    }
}

/// Every endpoint the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    MessageFrequency,
    HourlyActivity,
    WeekdayActivity,
    MessageTypes,
    ResponseTime,
    ActiveInactive,
    MemberGrowth,
    TopSenders,
    TopRepliers,
    TopBots,
}

impl MetricId {
    pub fn all() -> &'static [MetricId] {
        &[
            MetricId::MessageFrequency,
            MetricId::HourlyActivity,
            MetricId::WeekdayActivity,
            MetricId::MessageTypes,
            MetricId::ResponseTime,
            MetricId::ActiveInactive,
            MetricId::MemberGrowth,
            MetricId::TopSenders,
            MetricId::TopRepliers,
            MetricId::TopBots,
        ]
    }

    /// Endpoint path below `graphs/`
    pub fn path(&self) -> &'static str {
        match self {
            MetricId::MessageFrequency => "messages/frequency",
            MetricId::HourlyActivity => "messages/hourly",
            MetricId::WeekdayActivity => "messages/weekday",
            MetricId::MessageTypes => "messages/types",
            MetricId::ResponseTime => "messages/response-time",
            MetricId::ActiveInactive => "members/active-inactive",
            MetricId::MemberGrowth => "members/growth",
            MetricId::TopSenders => "members/top-senders",
            MetricId::TopRepliers => "members/top-repliers",
            MetricId::TopBots => "bots/top-bots",
        }
    }

    /// Kebab-case name used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            MetricId::MessageFrequency => "message-frequency",
            MetricId::HourlyActivity => "hourly-activity",
            MetricId::WeekdayActivity => "weekday-activity",
            MetricId::MessageTypes => "message-types",
            MetricId::ResponseTime => "response-time",
            MetricId::ActiveInactive => "active-inactive",
            MetricId::MemberGrowth => "member-growth",
            MetricId::TopSenders => "top-senders",
            MetricId::TopRepliers => "top-repliers",
            MetricId::TopBots => "top-bots",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricId::MessageFrequency => "Daily Messages",
            MetricId::HourlyActivity => "Messages by Hour",
            MetricId::WeekdayActivity => "Messages by Weekday",
            MetricId::MessageTypes => "Message Types",
            MetricId::ResponseTime => "Avg Response Time (min)",
            MetricId::ActiveInactive => "Active vs Inactive",
            MetricId::MemberGrowth => "New Members",
            MetricId::TopSenders => "Top Senders",
            MetricId::TopRepliers => "Top Repliers",
            MetricId::TopBots => "Top Bots",
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            MetricId::MessageFrequency | MetricId::HourlyActivity | MetricId::WeekdayActivity => {
                ChartKind::Bar
            }
            MetricId::ResponseTime | MetricId::MemberGrowth => ChartKind::Line,
            MetricId::MessageTypes | MetricId::ActiveInactive => ChartKind::Doughnut,
            MetricId::TopSenders | MetricId::TopRepliers | MetricId::TopBots => {
                ChartKind::Leaderboard
            }
        }
    }

    pub fn domain(&self) -> Domain {
        match self.path().split('/').next() {
            Some("members") => Domain::Members,
            Some("bots") => Domain::Bots,
            _ => Domain::Messages,
        }
    }

    /// Decode a raw payload with this endpoint's contract and adapt it
    pub fn adapt_json(&self, payload: serde_json::Value) -> Result<Visual, FetchError> {
        match self {
            MetricId::MessageFrequency => decode_and_adapt::<MessageFrequency>(payload),
            MetricId::HourlyActivity => decode_and_adapt::<HourlyActivity>(payload),
            MetricId::WeekdayActivity => decode_and_adapt::<WeekdayActivity>(payload),
            MetricId::MessageTypes => decode_and_adapt::<MessageTypes>(payload),
            MetricId::ResponseTime => decode_and_adapt::<ResponseTime>(payload),
            MetricId::ActiveInactive => decode_and_adapt::<ActiveInactive>(payload),
            MetricId::MemberGrowth => decode_and_adapt::<MemberGrowth>(payload),
            MetricId::TopSenders => decode_and_adapt::<TopSenders>(payload),
            MetricId::TopRepliers => decode_and_adapt::<TopRepliers>(payload),
            MetricId::TopBots => decode_and_adapt::<TopBots>(payload),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for MetricId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        MetricId::all()
            .iter()
            .copied()
            .find(|m| m.slug() == wanted || m.path() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = MetricId::all().iter().map(|m| m.slug()).collect();
                format!("unknown metric '{}' (known: {})", s, known.join(", "))
            })
    }
}

fn decode_and_adapt<M: Metric>(payload: serde_json::Value) -> Result<Visual, FetchError> {
    let response: M::Response =
        serde_json::from_value(payload).map_err(|source| FetchError::Decode {
            path: M::ID.path().to_string(),
            source,
        })?;
    let visual = M::adapt(&response)?;
    debug!(metric = %M::ID, points = visual.len(), "Adapted metric payload");
    Ok(visual)
}

/// Fetch one metric for a group and turn it into a renderable visual
pub async fn fetch_visual(
    source: &dyn MetricSource,
    metric: MetricId,
    group: &GroupId,
) -> Result<Visual, FetchError> {
    let payload = source.fetch_json(metric.path(), group).await?;
    metric.adapt_json(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slug_round_trip_and_path_alias() {
        for metric in MetricId::all() {
            assert_eq!(metric.slug().parse::<MetricId>().unwrap(), *metric);
        }
        assert_eq!(
            "members/top-senders".parse::<MetricId>().unwrap(),
            MetricId::TopSenders
        );
        assert_eq!(
            "TOP_BOTS".parse::<MetricId>().unwrap(),
            MetricId::TopBots
        );
        assert!("nope".parse::<MetricId>().unwrap_err().contains("top-bots"));
    }

    #[test]
    fn test_domains_partition_catalog() {
        let total: usize = Domain::all().iter().map(|d| d.metrics().len()).sum();
        assert_eq!(total, MetricId::all().len());
        assert_eq!(Domain::Bots.metrics(), vec![MetricId::TopBots]);
    }

    #[test]
    fn test_kind_matches_adapted_visual() {
        let payloads = [
            (MetricId::MessageFrequency, json!([])),
            (MetricId::HourlyActivity, json!([])),
            (MetricId::WeekdayActivity, json!([])),
            (MetricId::MessageTypes, json!([])),
            (MetricId::ResponseTime, json!([])),
            (
                MetricId::ActiveInactive,
                json!({"active_vs_inactive": {"active_count": 1, "inactive_count": 2}}),
            ),
            (MetricId::MemberGrowth, json!([])),
            (MetricId::TopSenders, json!([])),
            (MetricId::TopRepliers, json!([])),
            (MetricId::TopBots, json!([])),
        ];

        for (metric, payload) in payloads {
            let visual = metric.adapt_json(payload).unwrap();
            assert_eq!(visual.kind(), metric.kind(), "{}", metric);
        }
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let err = MetricId::MessageFrequency
            .adapt_json(json!({"unexpected": true}))
            .unwrap_err();
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().contains("messages/frequency"));
    }
}
