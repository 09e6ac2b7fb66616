//! Draw the dashboard into a TestBackend and check what lands on screen

use groupboard_core::models::{GroupId, ThemePreference};
use groupboard_core::{Dashboard, FetchState, FixtureSource, ThemeWatcher};
use groupboard_tui::{ui, App};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

fn write_fixture(root: &Path, rel: &str, value: &Value) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_vec(value).unwrap()).unwrap();
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

async fn settle(app: &App) {
    for panel in app.dashboard.panels() {
        let mut rx = panel.subscribe_state();
        rx.wait_for(FetchState::is_settled).await.unwrap();
    }
}

fn app(root: &Path, group: Option<&str>) -> App {
    let dashboard = Dashboard::new(
        Arc::new(FixtureSource::new(root)),
        Arc::new(ThemeWatcher::new(ThemePreference::Dark)),
        vec![],
        group.map(GroupId::from),
    );
    App::new(dashboard, None)
}

#[tokio::test]
async fn test_messages_tab_renders_loaded_and_failed_panels() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(
        dir.path(),
        "messages/frequency.json",
        &json!([
            {"message_date": {"value": "2024-01-01"}, "daily_message_count": 5},
            {"message_date": {"value": "2024-01-02"}, "daily_message_count": 9}
        ]),
    );
    write_fixture(dir.path(), "messages/types.json", &json!([]));

    let mut app = app(dir.path(), Some("42"));
    app.dashboard.mount();
    settle(&app).await;

    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    terminal.draw(|f| ui::render(f, &mut app)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("groupboard"));
    assert!(text.contains("group 42"));
    assert!(text.contains("Daily Messages"));
    // Empty payload gets an explicit empty state
    assert!(text.contains("No data for this group"));
    // Missing fixtures fail closed
    assert!(text.contains("✗"));
}

#[tokio::test]
async fn test_no_group_renders_idle_panels() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path(), None);
    app.dashboard.mount();

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| ui::render(f, &mut app)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("no group"));
    assert!(text.contains("No group selected"));
}

#[tokio::test]
async fn test_members_tab_renders_doughnut_and_leaderboard() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(
        dir.path(),
        "members/active-inactive.json",
        &json!({"active_vs_inactive": {"active_count": 10, "inactive_count": 5}}),
    );
    write_fixture(
        dir.path(),
        "members/top-senders.json",
        &json!([{"sender_name": "alice", "message_count": 120}]),
    );

    let mut app = app(dir.path(), Some("1"));
    app.dashboard.mount();
    app.dashboard.select_tab(1);
    settle(&app).await;

    let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
    terminal.draw(|f| ui::render(f, &mut app)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("total 15"));
    assert!(text.contains("Active Members"));
    assert!(text.contains("alice"));
    assert!(text.contains("Messages"));
}
