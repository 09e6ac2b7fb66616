//! groupboard - Terminal analytics dashboard for community groups

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::ExportFormat;
use groupboard_core::models::theme::THEME_ENV;
use groupboard_core::models::{GroupId, ThemePreference};
use groupboard_core::{
    Config, Dashboard, FixtureSource, HttpSource, MetricId, MetricSource, Preferences,
    ThemeWatcher,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "groupboard",
    version,
    about = "Terminal analytics dashboard for community groups",
    long_about = "Charts message, member and bot activity for a chat group, fetched from\n\
                  an analytics API (GET <server>/graphs/<domain>/<metric>?group_id=<id>).\n\
                  \n\
                  Examples:\n\
                    groupboard                                   # Run TUI (default)\n\
                    groupboard tui --group 42                    # Start on group 42\n\
                    groupboard metrics                           # List available metrics\n\
                    groupboard show top-senders --group 42       # Print one metric\n\
                    groupboard export message-frequency --group 42 --output freq.csv\n\
                    groupboard --fixtures ./fixtures show top-bots --group 1\n\
                  \n\
                  Environment Variables:\n\
                    GROUPBOARD_SERVER_URL    # Analytics API root\n\
                    GROUPBOARD_CONFIG        # Alternate config.toml\n\
                    GROUPBOARD_THEME         # Force light|dark\n\
                    RUST_LOG                 # Log filter (default: groupboard=info)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Analytics API root (overrides config and GROUPBOARD_SERVER_URL)
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve metrics from JSON files under this directory instead of HTTP
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Force light or dark rendering
    #[arg(long, global = true, env = THEME_ENV)]
    theme: Option<ThemePreference>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "GROUPBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui {
        /// Group shown at startup
        #[arg(long)]
        group: Option<GroupId>,
    },
    /// List the metric catalog
    Metrics,
    /// Fetch one metric and print it
    Show {
        /// Metric id (e.g. top-senders)
        metric: MetricId,

        #[arg(long)]
        group: GroupId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch one metric and write it to a file
    Export {
        metric: MetricId,

        #[arg(long)]
        group: GroupId,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (default: from extension, else csv)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode.unwrap_or(Mode::Tui { group: None });

    let tui = matches!(mode, Mode::Tui { .. });
    init_tracing(tui, cli.no_color);

    let config = Config::load(cli.config.as_deref(), cli.server_url)
        .context("Failed to load configuration")?;

    let source = build_source(&config, cli.fixtures.as_deref())?;
    info!(source = %source.describe(), "Metric source ready");

    match mode {
        Mode::Tui { group } => run_tui(config, source, group, cli.theme).await?,
        Mode::Metrics => println!("{}", cli::format_metric_catalog(cli.no_color)),
        Mode::Show {
            metric,
            group,
            json,
        } => cli::run_show(source.as_ref(), metric, &group, json, cli.no_color).await?,
        Mode::Export {
            metric,
            group,
            output,
            format,
        } => cli::run_export(source.as_ref(), metric, &group, &output, format).await?,
    }

    Ok(())
}

/// Logs go to stderr, except in TUI mode where they would corrupt the
/// alternate screen and go to `<cache_dir>/groupboard/groupboard.log`.
fn init_tracing(tui: bool, no_color: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("groupboard=info"));

    if tui {
        let Some(dir) = Preferences::default_dir() else {
            return;
        };
        let file = std::fs::create_dir_all(&dir)
            .and_then(|_| std::fs::File::create(dir.join("groupboard.log")));
        if let Ok(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(!no_color)
            .init();
    }
}

fn build_source(config: &Config, fixtures: Option<&Path>) -> Result<Arc<dyn MetricSource>> {
    if let Some(dir) = fixtures {
        if !dir.is_dir() {
            anyhow::bail!("Fixture directory not found: {}", dir.display());
        }
        return Ok(Arc::new(FixtureSource::new(dir)));
    }

    let source = HttpSource::new(config.http_source_config())
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(source))
}

async fn run_tui(
    config: Config,
    source: Arc<dyn MetricSource>,
    group: Option<GroupId>,
    theme: Option<ThemePreference>,
) -> Result<()> {
    let prefs_dir = Preferences::default_dir();
    let prefs = prefs_dir
        .as_deref()
        .map(Preferences::load)
        .unwrap_or_default();

    // --theme/GROUPBOARD_THEME, then config, then last session, then terminal
    let themes = match theme.or(config.theme).or(prefs.theme) {
        Some(theme) => ThemeWatcher::new(theme),
        None => ThemeWatcher::detect(),
    };
    // Config already re-applies its own theme; only user choices are saved
    let theme_pinned = theme.is_some() || (config.theme.is_none() && prefs.theme.is_some());

    let group = group
        .or(prefs.last_group)
        .or_else(|| config.initial_group());
    if group.is_none() {
        warn!("No group selected; panels stay idle until one is chosen");
    }

    let dashboard = Dashboard::new(source, Arc::new(themes), config.groups, group);
    groupboard_tui::run(dashboard, prefs_dir, theme_pinned).await
}
