//! Multi-series price history chart

use betaboard_core::PriceSeries;
use chrono::NaiveDate;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

/// Fixed line palette. Adjacent tickers in entry order stay visually
/// distinct as long as fewer than `PALETTE.len()` series are shown.
pub const PALETTE: [Color; 13] = [
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Rgb(255, 165, 0),   // orange
    Color::Rgb(160, 32, 240),  // purple
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Rgb(165, 42, 42),   // brown
    Color::Rgb(255, 192, 203), // pink
    Color::Gray,
    Color::Rgb(128, 128, 0),   // olive
    Color::Rgb(0, 128, 128),   // teal
];

/// Line color for the ticker at `index`, cycling through the palette.
pub fn color_for(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Owned plot data for one run, borrowed by the chart widget while drawing.
///
/// Dates are plotted as day offsets from the earliest date across all
/// series so differently-covered tickers share one x axis.
pub struct ChartData {
    series: Vec<(String, Vec<(f64, f64)>)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_labels: [String; 3],
}

impl ChartData {
    /// Build plot data from the run's valid series. Series with no points
    /// are omitted; returns `None` when nothing is plottable.
    pub fn from_series(input: &[(String, PriceSeries)]) -> Option<Self> {
        let origin: NaiveDate = input
            .iter()
            .filter_map(|(_, s)| s.first())
            .map(|p| p.date)
            .min()?;

        let mut last_day = 0.0_f64;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut series = Vec::new();

        for (ticker, prices) in input {
            if prices.is_empty() {
                continue;
            }
            let points: Vec<(f64, f64)> = prices
                .points()
                .iter()
                .map(|p| ((p.date - origin).num_days() as f64, p.adj_close))
                .collect();

            for &(x, y) in &points {
                last_day = last_day.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
            series.push((ticker.clone(), points));
        }

        if series.is_empty() {
            return None;
        }

        // keep the lines off the frame edges
        let pad = ((y_max - y_min) * 0.05).max(1.0);
        let y_bounds = [y_min - pad, y_max + pad];
        let x_bounds = [0.0, last_day.max(1.0)];

        let mid = origin + chrono::Days::new((last_day / 2.0) as u64);
        let end = origin + chrono::Days::new(last_day as u64);
        let x_labels = [origin.to_string(), mid.to_string(), end.to_string()];

        Some(Self {
            series,
            x_bounds,
            y_bounds,
            x_labels,
        })
    }

    /// The chart widget, borrowing this data for the duration of the draw.
    pub fn chart(&self) -> Chart<'_> {
        let datasets: Vec<Dataset<'_>> = self
            .series
            .iter()
            .enumerate()
            .map(|(i, (ticker, points))| {
                Dataset::default()
                    .name(ticker.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color_for(i)))
                    .data(points)
            })
            .collect();

        let [y_low, y_high] = self.y_bounds;
        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Historical Adjusted Close Prices "),
            )
            .x_axis(
                Axis::default()
                    .title("Date")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.x_bounds)
                    .labels(self.x_labels.iter().map(|l| Span::raw(l.clone())).collect::<Vec<_>>()),
            )
            .y_axis(
                Axis::default()
                    .title("Adj Close")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.y_bounds)
                    .labels(vec![
                        Span::raw(format!("{y_low:.1}")),
                        Span::raw(format!("{:.1}", (y_low + y_high) / 2.0)),
                        Span::raw(format!("{y_high:.1}")),
                    ]),
            )
    }
}
