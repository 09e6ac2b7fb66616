//! Export adapted visuals to CSV or JSON
//!
//! Exports write exactly what a panel would draw, so a spreadsheet and the
//! dashboard always agree.

use crate::metrics::MetricId;
use crate::models::{GroupId, Visual};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Quote a CSV field when it contains a separator, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Write a visual as CSV
///
/// Charts: `Label,<dataset>...`, one row per label.
/// Leaderboards: `Rank,Name,<value label>`, one row per entry.
pub fn write_visual_csv<W: Write>(visual: &Visual, writer: &mut W) -> Result<()> {
    match visual {
        Visual::Chart(chart) => {
            let mut header = vec!["Label".to_string()];
            header.extend(chart.datasets.iter().map(|d| csv_field(&d.name)));
            writeln!(writer, "{}", header.join(",")).context("Failed to write CSV header")?;

            for (i, label) in chart.labels.iter().enumerate() {
                let mut row = vec![csv_field(label)];
                row.extend(
                    chart
                        .datasets
                        .iter()
                        .map(|d| d.values.get(i).copied().map(csv_number).unwrap_or_default()),
                );
                writeln!(writer, "{}", row.join(","))
                    .with_context(|| format!("Failed to write row for label {}", label))?;
            }
        }
        Visual::Leaderboard(board) => {
            writeln!(writer, "Rank,Name,{}", csv_field(&board.value_label))
                .context("Failed to write CSV header")?;
            for row in &board.rows {
                writeln!(
                    writer,
                    "{},{},{}",
                    row.rank,
                    csv_field(&row.name),
                    csv_number(row.value)
                )
                .with_context(|| format!("Failed to write row for {}", row.name))?;
            }
        }
    }
    Ok(())
}

/// JSON export envelope
#[derive(Debug, Serialize)]
pub struct VisualExport<'a> {
    pub metric: &'a str,
    pub title: &'a str,
    pub group: &'a GroupId,
    pub exported_at: DateTime<Utc>,
    pub visual: &'a Visual,
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Export a visual to a CSV file (created/overwritten)
pub fn export_visual_to_csv(visual: &Visual, path: &Path) -> Result<()> {
    let mut writer = create_output(path)?;
    write_visual_csv(visual, &mut writer)?;
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export a visual with its metric/group context to a JSON file
pub fn export_visual_to_json(
    metric: MetricId,
    group: &GroupId,
    visual: &Visual,
    path: &Path,
) -> Result<()> {
    let envelope = VisualExport {
        metric: metric.slug(),
        title: metric.title(),
        group,
        exported_at: Utc::now(),
        visual,
    };

    let mut writer = create_output(path)?;
    serde_json::to_writer_pretty(&mut writer, &envelope)
        .context("Failed to serialize export to JSON")?;
    writer.flush().context("Failed to flush JSON writer")?;
    Ok(())
}
