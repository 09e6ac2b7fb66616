//! Membership endpoints (`graphs/members/*`)

use super::{DateValue, Metric, MetricId};
use crate::error::ShapeError;
use crate::models::{ChartData, ChartKind, Dataset, Leaderboard, TimePoint, Visual};
use serde::Deserialize;

/// Active vs inactive member split
pub struct ActiveInactive;

#[derive(Debug, Clone, Deserialize)]
pub struct ActiveInactiveResponse {
    pub active_vs_inactive: ActiveInactiveCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveInactiveCounts {
    #[serde(default)]
    pub active_count: u64,
    #[serde(default)]
    pub inactive_count: u64,
}

impl ActiveInactiveCounts {
    pub fn total(&self) -> u64 {
        self.active_count + self.inactive_count
    }
}

impl Metric for ActiveInactive {
    type Response = ActiveInactiveResponse;
    const ID: MetricId = MetricId::ActiveInactive;

    fn adapt(response: &Self::Response) -> Result<Visual, ShapeError> {
        let counts = &response.active_vs_inactive;
        let chart = ChartData::new(
            ChartKind::Doughnut,
            vec!["Active Members".to_string(), "Inactive Members".to_string()],
            vec![Dataset {
                name: "Members".to_string(),
                values: vec![counts.active_count as f64, counts.inactive_count as f64],
            }],
        )?;
        Ok(Visual::Chart(chart))
    }
}

/// New members per day
pub struct MemberGrowth;

#[derive(Debug, Clone, Deserialize)]
pub struct MemberGrowthRow {
    pub join_date: DateValue,
    #[serde(default)]
    pub new_members: u64,
}

impl Metric for MemberGrowth {
    type Response = Vec<MemberGrowthRow>;
    const ID: MetricId = MetricId::MemberGrowth;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        let points = rows
            .iter()
            .map(|r| TimePoint {
                time: r.join_date.value.clone(),
                value: r.new_members as f64,
            })
            .collect();
        Ok(Visual::Chart(
            TimePoint::series("New Members", points).into_chart(ChartKind::Line),
        ))
    }
}

/// Members ranked by messages sent
pub struct TopSenders;

#[derive(Debug, Clone, Deserialize)]
pub struct SenderRow {
    pub sender_name: String,
    #[serde(default)]
    pub message_count: u64,
}

impl Metric for TopSenders {
    type Response = Vec<SenderRow>;
    const ID: MetricId = MetricId::TopSenders;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        Ok(Visual::Leaderboard(Leaderboard::ranked(
            "Messages",
            rows.iter()
                .map(|r| (r.sender_name.clone(), r.message_count as f64)),
        )))
    }
}

/// Members ranked by replies written
pub struct TopRepliers;

#[derive(Debug, Clone, Deserialize)]
pub struct ReplierRow {
    pub sender_name: String,
    #[serde(default)]
    pub total_replies: u64,
}

impl Metric for TopRepliers {
    type Response = Vec<ReplierRow>;
    const ID: MetricId = MetricId::TopRepliers;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        Ok(Visual::Leaderboard(Leaderboard::ranked(
            "Replies",
            rows.iter()
                .map(|r| (r.sender_name.clone(), r.total_replies as f64)),
        )))
    }
}
