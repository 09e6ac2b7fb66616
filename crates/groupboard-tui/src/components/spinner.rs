//! Loading indicator shared by every panel
//!
//! The frame is derived from elapsed time, so all loading panels animate in
//! lockstep regardless of how often they are drawn.

use crate::theme::StatusColor;
use groupboard_core::models::ThemePreference;
use ratatui::{style::Style, text::Span};
use std::time::{Duration, Instant};

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const FRAME_DURATION: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    started: Instant,
    frame: usize,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frame: 0,
        }
    }

    /// Sync the frame with the clock (once per draw)
    pub fn tick(&mut self) {
        self.frame = Self::frame_at(self.started.elapsed());
    }

    fn frame_at(elapsed: Duration) -> usize {
        (elapsed.as_millis() / FRAME_DURATION.as_millis()) as usize % FRAMES.len()
    }

    pub fn symbol(&self) -> &'static str {
        FRAMES[self.frame]
    }

    /// Current frame in the theme's "in progress" color
    pub fn render(&self, theme: ThemePreference) -> Span<'static> {
        Span::styled(
            self.symbol(),
            Style::default().fg(StatusColor::Warning.to_color(theme)),
        )
    }
}
