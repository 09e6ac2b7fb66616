//! Main UI rendering: header, panel grid, status bar

use crate::app::App;
use crate::theme::{BaseColors, StatusColor};
use crate::widgets::render_panel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Render the whole dashboard
pub fn render(frame: &mut Frame, app: &mut App) {
    app.spinner.tick();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + tabs
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_panels(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let dashboard = &app.dashboard;

    let titles: Vec<Line> = dashboard
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.domain.name())))
        .collect();

    let group = dashboard
        .group()
        .map(|g| format!("group {}", g))
        .unwrap_or_else(|| "no group".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BaseColors::muted(theme)))
        .title(Span::styled(
            " groupboard ",
            Style::default()
                .fg(StatusColor::Focus.to_color(theme))
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(vec![
                Span::styled(
                    format!(" {} ", group),
                    Style::default().fg(StatusColor::Important.to_color(theme)),
                ),
                Span::styled(
                    format!("· {} · {} ", theme.name(), dashboard.source_description()),
                    Style::default().fg(BaseColors::muted(theme)),
                ),
            ])
            .right_aligned(),
        );

    let tabs = Tabs::new(titles)
        .block(block)
        .select(dashboard.active_index())
        .style(Style::default().fg(BaseColors::fg(theme)))
        .highlight_style(
            Style::default()
                .fg(StatusColor::Focus.to_color(theme))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

    frame.render_widget(tabs, area);
}

/// Two-column grid, rows split evenly
fn render_panels(frame: &mut Frame, area: Rect, app: &App) {
    let panels = app.dashboard.panels();
    if panels.is_empty() {
        return;
    }

    let row_count = panels.len().div_ceil(2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(area);

    for (row_idx, pair) in panels.chunks(2).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, pair.len() as u32); pair.len()])
            .split(rows[row_idx]);

        for (panel, col) in pair.iter().zip(cols.iter()) {
            render_panel(frame, *col, panel, &app.spinner);
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let key = Style::default().fg(StatusColor::Focus.to_color(theme));
    let muted = Style::default().fg(BaseColors::muted(theme));

    let mut spans = vec![
        Span::styled(" q", key),
        Span::styled(" quit  ", muted),
        Span::styled("Tab/1-3", key),
        Span::styled(" domain  ", muted),
        Span::styled("g/G", key),
        Span::styled(" group  ", muted),
        Span::styled("r", key),
        Span::styled(" refresh  ", muted),
        Span::styled("t", key),
        Span::styled(" theme", muted),
    ];

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!("  │ {}", message),
            Style::default().fg(StatusColor::Warning.to_color(theme)),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
