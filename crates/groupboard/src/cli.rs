//! Non-interactive commands: catalog listing, one-shot show, export
//!
//! Formatting lives here so it can be tested without a terminal or a server.

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use groupboard_core::models::{GroupId, Visual};
use groupboard_core::{
    export_visual_to_csv, export_visual_to_json, fetch_visual, MetricId, MetricSource,
};
use groupboard_tui::widgets::format_value;
use std::path::Path;
use tracing::info;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess from the output extension, falling back to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

fn header(table: &mut Table, columns: Vec<&str>, no_color: bool) {
    if no_color {
        table.set_header(columns);
    } else {
        table.set_header(
            columns
                .into_iter()
                .map(|c| Cell::new(c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
}

/// Table of every metric the dashboard knows
pub fn format_metric_catalog(no_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    header(&mut table, vec!["Metric", "Domain", "Endpoint", "Chart", "Title"], no_color);

    for metric in MetricId::all() {
        table.add_row(Row::from(vec![
            metric.slug().to_string(),
            metric.domain().name().to_string(),
            format!("graphs/{}", metric.path()),
            metric.kind().name().to_string(),
            metric.title().to_string(),
        ]));
    }

    table.to_string()
}

/// Format an adapted visual (human table or JSON)
pub fn format_visual(
    metric: MetricId,
    group: &GroupId,
    visual: &Visual,
    json: bool,
    no_color: bool,
) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(visual).context("Failed to serialize visual");
    }

    if visual.is_empty() {
        return Ok(format!("{}: no data for group {}.", metric.title(), group));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    match visual {
        Visual::Chart(chart) => {
            let mut columns = vec!["Label"];
            columns.extend(chart.datasets.iter().map(|d| d.name.as_str()));
            header(&mut table, columns, no_color);

            for (i, label) in chart.labels.iter().enumerate() {
                let mut row = vec![label.clone()];
                row.extend(chart.datasets.iter().map(|d| {
                    d.values
                        .get(i)
                        .map(|v| format_value(*v))
                        .unwrap_or_default()
                }));
                table.add_row(Row::from(row));
            }
        }
        Visual::Leaderboard(board) => {
            header(
                &mut table,
                vec!["Rank", "Name", board.value_label.as_str()],
                no_color,
            );
            for row in &board.rows {
                table.add_row(Row::from(vec![
                    format!("#{}", row.rank),
                    row.name.clone(),
                    format_value(row.value),
                ]));
            }
        }
    }

    let mut out = format!("{} (group {})\n{}", metric.title(), group, table);
    if let Visual::Chart(chart) = visual {
        out.push_str(&format!("\nTotal: {}", format_value(chart.total())));
    }
    Ok(out)
}

/// Fetch once and print
pub async fn run_show(
    source: &dyn MetricSource,
    metric: MetricId,
    group: &GroupId,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let visual = fetch_visual(source, metric, group)
        .await
        .with_context(|| format!("Failed to load {} for group {}", metric, group))?;
    println!("{}", format_visual(metric, group, &visual, json, no_color)?);
    Ok(())
}

/// Fetch once and write to a file
pub async fn run_export(
    source: &dyn MetricSource,
    metric: MetricId,
    group: &GroupId,
    output: &Path,
    format: Option<ExportFormat>,
) -> Result<()> {
    let visual = fetch_visual(source, metric, group)
        .await
        .with_context(|| format!("Failed to load {} for group {}", metric, group))?;

    match format.unwrap_or_else(|| ExportFormat::from_path(output)) {
        ExportFormat::Csv => export_visual_to_csv(&visual, output)?,
        ExportFormat::Json => export_visual_to_json(metric, group, &visual, output)?,
    }

    info!(%metric, %group, path = %output.display(), rows = visual.len(), "Exported metric");
    println!("Exported {} rows to {}", visual.len(), output.display());
    Ok(())
}
