//! Chart widgets for the dashboard

mod chart;

pub use chart::{ChartData, PALETTE, color_for};
