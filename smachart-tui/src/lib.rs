//! smachart TUI — terminal surface for the price and SMA chart.
//!
//! Provides:
//! - `TerminalRenderer`, a `ChartRenderer` that draws full-screen and blocks
//!   until the user presses `q`, `Esc` or `Enter`
//! - The chart panel drawing code, usable with any ratatui backend
//! - Parrot/neon theme tokens

pub mod chart_panel;
pub mod terminal;
pub mod theme;

pub use terminal::{install_panic_hook, TerminalRenderer};
pub use theme::Theme;
