//! Draw one metric panel: chrome from the fetch state, body from the visual

use crate::components::Spinner;
use crate::theme::{BaseColors, FetchStateColor, FocusStyle, RankColor, SeriesPalette, StatusColor};
use groupboard_core::models::{ChartData, ChartKind, Leaderboard, ThemePreference, Visual};
use groupboard_core::{FetchState, Panel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table},
    Frame,
};

/// Format large numbers (K, M, B)
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Render a panel into `area`
pub fn render_panel(frame: &mut Frame, area: Rect, panel: &Panel, spinner: &Spinner) {
    let theme = panel.theme();
    let state = panel.state();
    let state_color = FetchStateColor::from_state(&state);
    let icon = state_color.icon();
    let color = state_color.to_color(theme);

    let mut title = vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color)),
        Span::styled(
            format!("{} ", panel.metric().title()),
            Style::default()
                .fg(BaseColors::fg(theme))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let FetchState::Loaded { visual, fetched_at } = &state {
        if let Visual::Chart(chart) = visual.as_ref() {
            if chart.kind == ChartKind::Doughnut {
                title.push(Span::styled(
                    format!("· total {} ", format_value(chart.total())),
                    Style::default().fg(StatusColor::Important.to_color(theme)),
                ));
            }
        }
        title.push(Span::styled(
            format!("· {} ", fetched_at.format("%H:%M:%S")),
            Style::default().fg(BaseColors::muted(theme)),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if state.is_loading() {
            FocusStyle::focused_border(theme)
        } else {
            FocusStyle::unfocused_border(theme)
        }))
        .title(Line::from(title));

    match &state {
        FetchState::Idle => {
            let message = if panel.group().is_none() {
                "No group selected (press g)"
            } else {
                "Not loaded"
            };
            render_message(frame, area, block, message, BaseColors::muted(theme));
        }
        FetchState::Loading => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let line = Line::from(vec![
                spinner.render(theme),
                Span::styled(" Loading…", Style::default().fg(BaseColors::muted(theme))),
            ]);
            frame.render_widget(
                Paragraph::new(vec![Line::from(""), line]).alignment(Alignment::Center),
                inner,
            );
        }
        FetchState::Failed { error } => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No data",
                    Style::default().fg(BaseColors::muted(theme)),
                )),
                Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(StatusColor::Error.to_color(theme)),
                )),
            ];
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(ratatui::widgets::Wrap { trim: true }),
                inner,
            );
        }
        FetchState::Loaded { visual, .. } if visual.is_empty() => {
            render_message(
                frame,
                area,
                block,
                "No data for this group",
                BaseColors::muted(theme),
            );
        }
        FetchState::Loaded { visual, .. } => match visual.as_ref() {
            Visual::Chart(chart) => match chart.kind {
                ChartKind::Bar => {
                    render_bar(frame, area, block, chart, theme)
                }
                ChartKind::Line => {
                    render_line(frame, area, block, chart, theme)
                }
                _ => render_doughnut(frame, area, block, chart, theme),
            },
            Visual::Leaderboard(board) => render_leaderboard(frame, area, block, board, theme),
        },
    }
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    message: &str,
    color: ratatui::style::Color,
) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ])
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, area);
}

fn render_bar(frame: &mut Frame, area: Rect, block: Block, chart: &ChartData, theme: ThemePreference) {
    let inner_width = block.inner(area).width as usize;
    let count = chart.len().max(1);

    // Keep the most recent bars that fit, at least 1 column wide with 1 gap
    let fit = (inner_width / 2).max(1);
    let skip = count.saturating_sub(fit);
    let bar_width = ((inner_width / count.min(fit)).saturating_sub(1)).clamp(1, 9) as u16;

    let bars: Vec<(&str, u64)> = chart
        .labels
        .iter()
        .zip(chart.primary_values())
        .skip(skip)
        .map(|(label, value)| (label.as_str(), value.max(0.0).round() as u64))
        .collect();

    let color = StatusColor::Focus.to_color(theme);
    let barchart = BarChart::default()
        .block(block)
        .data(bars.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(BaseColors::bg(theme)).bg(color))
        .label_style(Style::default().fg(BaseColors::muted(theme)));

    frame.render_widget(barchart, area);
}

fn render_line(frame: &mut Frame, area: Rect, block: Block, chart: &ChartData, theme: ThemePreference) {
    let points: Vec<(f64, f64)> = chart
        .primary_values()
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let max_y = chart.max_value().max(1.0);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let muted = Style::default().fg(BaseColors::muted(theme));
    let first = chart.labels.first().cloned().unwrap_or_default();
    let last = chart.labels.last().cloned().unwrap_or_default();

    let name = chart
        .datasets
        .first()
        .map(|d| d.name.clone())
        .unwrap_or_default();

    let datasets = vec![Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(StatusColor::Success.to_color(theme)))
        .data(&points)];

    let line_chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(muted)
                .labels(vec![Span::raw(first), Span::raw(last)])
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(muted)
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_value(max_y / 2.0)),
                    Span::raw(format_value(max_y)),
                ])
                .bounds([0.0, max_y * 1.1]),
        );

    frame.render_widget(line_chart, area);
}

/// Terminal stand-in for a doughnut: one proportional gauge per slice
fn render_doughnut(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    chart: &ChartData,
    theme: ThemePreference,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = chart.total();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            chart
                .labels
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (label, value)) in chart
        .labels
        .iter()
        .zip(chart.primary_values())
        .enumerate()
    {
        let ratio = if total > 0.0 {
            (value / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(SeriesPalette::color(i, theme))
                    .bg(BaseColors::bg(theme)),
            )
            .ratio(ratio)
            .label(format!(
                "{} {} ({:.1}%)",
                label,
                format_value(*value),
                ratio * 100.0
            ));
        frame.render_widget(gauge, rows[i]);
    }
}

fn render_leaderboard(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    board: &Leaderboard,
    theme: ThemePreference,
) {
    let header_style = Style::default()
        .fg(StatusColor::Focus.to_color(theme))
        .add_modifier(Modifier::BOLD);

    let rows: Vec<Row> = board
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                format!("#{}", row.rank),
                row.name.clone(),
                format_value(row.value),
            ])
            .style(Style::default().fg(RankColor::from_rank(row.rank).to_color(theme)))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["Rank", "Name", board.value_label.as_str()]).style(header_style))
    .block(block);

    frame.render_widget(table, area);
}
