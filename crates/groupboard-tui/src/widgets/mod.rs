pub mod panel;

pub use panel::{format_value, render_panel};
