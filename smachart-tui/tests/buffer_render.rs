//! Visualizer step drawn into an off-screen ratatui buffer.

use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use smachart_core::{
    add_sma, show_data_with_sma, Bar, ChartError, ChartRenderer, ChartSpec, TimeSeriesTable,
};
use smachart_tui::{chart_panel, Theme};

/// Renders into a fixed-size test buffer instead of the real terminal.
struct BufferRenderer {
    terminal: Terminal<TestBackend>,
    frames: usize,
}

impl BufferRenderer {
    fn new() -> Self {
        Self {
            terminal: Terminal::new(TestBackend::new(100, 30)).unwrap(),
            frames: 0,
        }
    }

    fn screen(&self) -> String {
        self.terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }
}

impl ChartRenderer for BufferRenderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), ChartError> {
        let theme = Theme::default();
        self.terminal
            .draw(|f| chart_panel::render(f, f.area(), spec, &theme))
            .map_err(|e| ChartError::Render(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}

fn table() -> TimeSeriesTable {
    let base = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
    let bars = (0..40)
        .map(|i| Bar::from_close(base + chrono::Duration::days(i), 125.0 + (i as f64 * 0.3).sin() * 4.0))
        .collect();
    TimeSeriesTable::from_bars("AAPL", bars)
}

#[test]
fn chart_with_sma_is_drawn() {
    let table = add_sma(table(), 20).unwrap();
    let mut renderer = BufferRenderer::new();
    let returned = show_data_with_sma(table.clone(), 20, &mut renderer).unwrap();

    assert_eq!(returned, table);
    assert_eq!(renderer.frames, 1);
    let screen = renderer.screen();
    assert!(screen.contains("Stock Price with 20-Day SMA"));
    assert!(screen.contains("Close Price"));
    assert!(screen.contains("20-Day SMA"));
}

#[test]
fn missing_sma_never_touches_the_surface() {
    let mut renderer = BufferRenderer::new();
    let err = show_data_with_sma(table(), 20, &mut renderer).unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn { .. }));
    assert_eq!(renderer.frames, 0);
}
