//! Terminal UI components
//!
//! The controller only sees the `Render` capability. `TerminalRenderer`
//! draws through any ratatui backend, which lets tests use `TestBackend`.

pub mod screen;
pub mod theme;
pub mod view;

pub use theme::Theme;
pub use view::{Card, View};

use ratatui::{backend::Backend, Terminal};

use crate::app::App;

/// Something that can show the current application state
pub trait Render {
    /// Redraw everything: status, results, heading and favorites
    fn render(&mut self, app: &App);
}

/// Renders nothing. Used by CLI commands that drive the controller.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Render for NoopRenderer {
    fn render(&mut self, _app: &App) {}
}

/// Draws to a ratatui terminal
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Render for TerminalRenderer<B> {
    fn render(&mut self, app: &App) {
        if let Err(e) = self.terminal.draw(|frame| screen::draw(frame, app)) {
            tracing::error!(error = %e, "failed to draw frame");
        }
    }
}
