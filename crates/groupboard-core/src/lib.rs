//! groupboard-core - Core library for groupboard
//!
//! Typed metric contracts, shape adapters, metric sources, and the
//! cancellable panel lifecycle shared by every frontend.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod panel;
pub mod preferences;
pub mod source;
pub mod theme;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{ConfigError, FetchError, ShapeError};
pub use export::{export_visual_to_csv, export_visual_to_json};
pub use metrics::{fetch_visual, Domain, MetricId};
pub use panel::{FetchState, Panel};
pub use preferences::Preferences;
pub use source::{FixtureSource, HttpSource, MetricSource};
pub use theme::{ThemeSubscription, ThemeWatcher};
