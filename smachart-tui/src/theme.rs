//! Parrot/neon theme tokens for the chart surface.
//!
//! # Color Palette
//! - **Background**: Deep charcoal (chart surface)
//! - **Accent**: Electric cyan (close price line, title)
//! - **Warning**: Neon orange (moving average line)
//! - **Muted**: Steel blue (axes, labels, key hints)
//! - **Grid**: Dim gray (grid lines)

use ratatui::style::{Color, Modifier, Style};

/// Parrot/neon theme for the chart.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (close series, title)
    pub accent: Color,
    /// Neon orange (SMA series)
    pub warning: Color,
    /// Steel blue (axes and labels)
    pub muted: Color,
    /// Dim gray (grid lines)
    pub grid: Color,
    /// White (primary text)
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    /// Create the default Parrot/neon theme
    pub fn parrot_neon() -> Self {
        Self {
            // Background: deep charcoal (almost black)
            background: Color::Rgb(18, 18, 20),

            // Accent: electric cyan
            accent: Color::Rgb(0, 255, 255),

            // Warning: neon orange
            warning: Color::Rgb(255, 140, 0),

            // Muted: steel blue
            muted: Color::Rgb(100, 149, 237),

            grid: Color::Rgb(60, 60, 70),

            text_primary: Color::White,
        }
    }

    /// Line color for the series at `index` (close first, then averages).
    pub fn series_color(&self, index: usize) -> Color {
        match index {
            0 => self.accent,
            _ => self.warning,
        }
    }

    /// Fill for the whole chart area.
    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.background)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn grid_style(&self) -> Style {
        Style::default().fg(self.grid)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }
}
