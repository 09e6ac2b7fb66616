//! Bot usage endpoints (`graphs/bots/*`)

use super::{Metric, MetricId};
use crate::error::ShapeError;
use crate::models::{Leaderboard, Visual};
use serde::Deserialize;

/// Bots ranked by commands handled
pub struct TopBots;

#[derive(Debug, Clone, Deserialize)]
pub struct BotRow {
    pub bot_name: String,
    #[serde(default)]
    pub command_count: u64,
}

impl Metric for TopBots {
    type Response = Vec<BotRow>;
    const ID: MetricId = MetricId::TopBots;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        Ok(Visual::Leaderboard(Leaderboard::ranked(
            "Commands",
            rows.iter()
                .map(|r| (r.bot_name.clone(), r.command_count as f64)),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_bots() {
        let rows: Vec<BotRow> = serde_json::from_value(json!([
            {"bot_name": "@modbot", "command_count": 120},
            {"bot_name": "@pollbot"}
        ]))
        .unwrap();

        let visual = TopBots::adapt(&rows).unwrap();
        assert_eq!(visual.len(), 2);
        let series = visual.to_series();
        assert_eq!(series.points[1], ("@pollbot".to_string(), 0.0));
    }
}
