//! Color palette and style helpers for the TUI
//!
//! A dark "projection booth" palette: warm amber for focus, marquee red
//! for favorites and errors.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101014 (near-black)
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Panel background: #1c1c24
    pub const PANEL: Color = Color::Rgb(0x1c, 0x1c, 0x24);

    /// Primary: #ffb000 (projector amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xb0, 0x00);

    /// Marquee: #ff3b4e (favorite marker)
    pub const MARQUEE: Color = Color::Rgb(0xff, 0x3b, 0x4e);

    /// Text: #ececec
    pub const TEXT: Color = Color::Rgb(0xec, 0xec, 0xec);

    /// Muted: #8a8a99
    pub const MUTED: Color = Color::Rgb(0x8a, 0x8a, 0x99);

    /// Border: #4a4a58
    pub const BORDER: Color = Color::Rgb(0x4a, 0x4a, 0x58);

    /// Error: #ff5f5f
    pub const ERROR: Color = Color::Rgb(0xff, 0x5f, 0x5f);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Row under the cursor in the focused grid
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn favorite() -> Style {
        Style::default()
            .fg(Self::MARQUEE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }
}
