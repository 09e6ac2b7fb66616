//! Message activity endpoints (`graphs/messages/*`)

use super::{DateValue, Metric, MetricId};
use crate::error::ShapeError;
use crate::models::{ChartKind, MetricSeries, TimePoint, Visual};
use serde::Deserialize;

/// Messages per day
pub struct MessageFrequency;

#[derive(Debug, Clone, Deserialize)]
pub struct DailyMessageRow {
    pub message_date: DateValue,
    #[serde(default)]
    pub daily_message_count: u64,
}

impl Metric for MessageFrequency {
    type Response = Vec<DailyMessageRow>;
    const ID: MetricId = MetricId::MessageFrequency;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        let series = MetricSeries {
            name: "Messages".to_string(),
            points: rows
                .iter()
                .map(|r| (r.message_date.value.clone(), r.daily_message_count as f64))
                .collect(),
        };
        Ok(Visual::Chart(series.into_chart(ChartKind::Bar)))
    }
}

/// Messages bucketed by hour of day
pub struct HourlyActivity;

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyRow {
    pub hour: u8,
    #[serde(default)]
    pub message_count: u64,
}

impl Metric for HourlyActivity {
    type Response = Vec<HourlyRow>;
    const ID: MetricId = MetricId::HourlyActivity;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        let series = MetricSeries {
            name: "Messages".to_string(),
            points: rows
                .iter()
                .map(|r| (format!("{:02}", r.hour), r.message_count as f64))
                .collect(),
        };
        Ok(Visual::Chart(series.into_chart(ChartKind::Bar)))
    }
}

/// Messages bucketed by day of week
pub struct WeekdayActivity;

#[derive(Debug, Clone, Deserialize)]
pub struct WeekdayRow {
    /// 1 = Sunday .. 7 = Saturday
    pub day_of_week: u8,
    #[serde(default)]
    pub message_count: u64,
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn weekday_label(day: u8) -> String {
    match day {
        1..=7 => WEEKDAYS[(day - 1) as usize].to_string(),
        other => other.to_string(),
    }
}

impl Metric for WeekdayActivity {
    type Response = Vec<WeekdayRow>;
    const ID: MetricId = MetricId::WeekdayActivity;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        let series = MetricSeries {
            name: "Messages".to_string(),
            points: rows
                .iter()
                .map(|r| (weekday_label(r.day_of_week), r.message_count as f64))
                .collect(),
        };
        Ok(Visual::Chart(series.into_chart(ChartKind::Bar)))
    }
}

/// Share of text, media, sticker, ... messages
pub struct MessageTypes;

#[derive(Debug, Clone, Deserialize)]
pub struct MessageTypeRow {
    pub message_type: String,
    #[serde(default)]
    pub message_count: u64,
}

impl Metric for MessageTypes {
    type Response = Vec<MessageTypeRow>;
    const ID: MetricId = MetricId::MessageTypes;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        let series = MetricSeries {
            name: "Messages".to_string(),
            points: rows
                .iter()
                .map(|r| (r.message_type.clone(), r.message_count as f64))
                .collect(),
        };
        Ok(Visual::Chart(series.into_chart(ChartKind::Doughnut)))
    }
}

/// Average minutes until a message gets a reply, per day
pub struct ResponseTime;

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseTimeRow {
    pub message_date: DateValue,
    #[serde(default)]
    pub avg_response_minutes: f64,
}

impl Metric for ResponseTime {
    type Response = Vec<ResponseTimeRow>;
    const ID: MetricId = MetricId::ResponseTime;

    fn adapt(rows: &Self::Response) -> Result<Visual, ShapeError> {
        let points = rows
            .iter()
            .map(|r| TimePoint {
                time: r.message_date.value.clone(),
                value: r.avg_response_minutes,
            })
            .collect();
        let series = TimePoint::series("Minutes", points);
        Ok(Visual::Chart(series.into_chart(ChartKind::Line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartData;
    use serde_json::json;

    fn chart(visual: Visual) -> ChartData {
        match visual {
            Visual::Chart(chart) => chart,
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_message_frequency_example() {
        let rows: Vec<DailyMessageRow> = serde_json::from_value(json!([
            {"message_date": {"value": "2024-01-01"}, "daily_message_count": 5}
        ]))
        .unwrap();

        let chart = chart(MessageFrequency::adapt(&rows).unwrap());
        assert_eq!(chart.labels, vec!["2024-01-01"]);
        assert_eq!(chart.primary_values(), &[5.0]);
    }

    #[test]
    fn test_message_frequency_is_idempotent() {
        let rows: Vec<DailyMessageRow> = serde_json::from_value(json!([
            {"message_date": {"value": "2024-01-01"}, "daily_message_count": 5},
            {"message_date": {"value": "2024-01-02"}, "daily_message_count": 9}
        ]))
        .unwrap();

        let first = MessageFrequency::adapt(&rows).unwrap();
        let second = MessageFrequency::adapt(&rows).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), rows.len());
    }

    #[test]
    fn test_missing_count_defaults_to_zero() {
        let rows: Vec<DailyMessageRow> =
            serde_json::from_value(json!([{"message_date": {"value": "2024-03-01"}}])).unwrap();
        let chart = chart(MessageFrequency::adapt(&rows).unwrap());
        assert_eq!(chart.primary_values(), &[0.0]);
    }

    #[test]
    fn test_hourly_labels_are_zero_padded() {
        let rows: Vec<HourlyRow> = serde_json::from_value(json!([
            {"hour": 0, "message_count": 2},
            {"hour": 13, "message_count": 7}
        ]))
        .unwrap();
        let chart = chart(HourlyActivity::adapt(&rows).unwrap());
        assert_eq!(chart.labels, vec!["00", "13"]);
    }

    #[test]
    fn test_weekday_labels() {
        let rows: Vec<WeekdayRow> = serde_json::from_value(json!([
            {"day_of_week": 1, "message_count": 4},
            {"day_of_week": 7, "message_count": 1},
            {"day_of_week": 9, "message_count": 0}
        ]))
        .unwrap();
        let chart = chart(WeekdayActivity::adapt(&rows).unwrap());
        assert_eq!(chart.labels, vec!["Sun", "Sat", "9"]);
    }

    #[test]
    fn test_response_time_is_line_of_time_points() {
        let rows: Vec<ResponseTimeRow> = serde_json::from_value(json!([
            {"message_date": {"value": "2024-01-01"}, "avg_response_minutes": 12.5},
            {"message_date": {"value": "2024-01-02"}, "avg_response_minutes": 8.0}
        ]))
        .unwrap();
        let chart = chart(ResponseTime::adapt(&rows).unwrap());
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.primary_values(), &[12.5, 8.0]);
    }

    #[test]
    fn test_message_types_doughnut_total() {
        let rows: Vec<MessageTypeRow> = serde_json::from_value(json!([
            {"message_type": "text", "message_count": 90},
            {"message_type": "photo", "message_count": 10}
        ]))
        .unwrap();
        let chart = chart(MessageTypes::adapt(&rows).unwrap());
        assert_eq!(chart.kind, ChartKind::Doughnut);
        assert_eq!(chart.total(), 100.0);
    }
}
