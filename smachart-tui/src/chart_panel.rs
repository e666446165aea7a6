//! Full-screen price chart: close and SMA lines with legend and grid.

use chrono::NaiveDate;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph,
};
use ratatui::Frame;

use smachart_core::ChartSpec;

use crate::theme::Theme;

/// Key hint shown on the bottom border.
pub const DISMISS_HINT: &str = " q / Esc / Enter to close ";

pub fn render(f: &mut Frame, area: Rect, spec: &ChartSpec, theme: &Theme) {
    let block = Block::default()
        .style(theme.surface_style())
        .borders(Borders::ALL)
        .border_style(theme.muted_style())
        .title(Span::styled(format!(" {} ", spec.title), theme.title_style()))
        .title_alignment(Alignment::Center)
        .title_bottom(Line::from(Span::styled(DISMISS_HINT, theme.muted_style())));

    match (spec.date_range(), spec.value_range()) {
        (Some(dates), Some(values)) => render_chart(f, area, block, spec, theme, dates, values),
        _ => render_empty(f, area, block, theme),
    }
}

fn render_empty(f: &mut Frame, area: Rect, block: Block, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No price data to chart.", theme.muted_style())),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    block: Block,
    spec: &ChartSpec,
    theme: &Theme,
    (first, last): (NaiveDate, NaiveDate),
    (min_y, max_y): (f64, f64),
) {
    let padding = ((max_y - min_y).abs() * 0.05).max(0.5);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = days_between(first, last).max(1.0);

    // x is days since the first bar, so weekends and holidays keep their width.
    let series_points: Vec<Vec<(f64, f64)>> = spec
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|&(date, v)| (days_between(first, date), v))
                .collect()
        })
        .collect();

    let x_ticks = [0.0, x_max / 2.0, x_max];
    let y_ticks = [y_min, (y_min + y_max) / 2.0, y_max];
    let grid_lines: Vec<[(f64, f64); 2]> = if spec.grid {
        x_ticks
            .iter()
            .map(|&x| [(x, y_min), (x, y_max)])
            .chain(y_ticks.iter().map(|&y| [(0.0, y), (x_max, y)]))
            .collect()
    } else {
        Vec::new()
    };

    // Grid first so the price lines draw over it. Unnamed datasets stay
    // out of the legend.
    let mut datasets: Vec<Dataset> = grid_lines
        .iter()
        .map(|line| {
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(theme.grid_style())
                .data(line)
        })
        .collect();

    datasets.extend(spec.series.iter().zip(&series_points).enumerate().map(
        |(i, (series, points))| {
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(points)
        },
    ));

    let mid_date = first + chrono::Duration::days((x_max / 2.0).round() as i64);
    let x_labels: Vec<Span> = [first, mid_date, last]
        .iter()
        .map(|d| Span::styled(d.format("%Y-%m-%d").to_string(), theme.muted_style()))
        .collect();
    let y_labels: Vec<Span> = y_ticks
        .iter()
        .map(|v| Span::styled(format!("{v:.2}"), theme.muted_style()))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_label.clone(), theme.muted_style()))
                .style(theme.muted_style())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_label.clone(), theme.muted_style()))
                .style(theme.muted_style())
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}
