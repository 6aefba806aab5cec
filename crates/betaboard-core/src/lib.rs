//! Domain types and statistics for the betaboard dashboard
//!
//! This crate holds everything that does not touch the network or the
//! terminal:
//!
//! - Lookback periods (`TimePeriod`)
//! - Date-indexed adjusted-close series (`PriceSeries`)
//! - The two derived metrics: annualized average log-return and market beta
//!   via an ordinary-least-squares fit against the benchmark's returns
//!
//! All functions here are pure. Fetching lives in `betaboard-data`, the
//! interactive session in `betaboard-tui`.

pub mod error;
pub mod metrics;
pub mod period;
pub mod series;

// Re-export main types for convenience
pub use error::{MetricsError, Result};
pub use metrics::{OlsFit, TRADING_DAYS_PER_YEAR, annualized_return_pct, beta_from_series};
pub use period::TimePeriod;
pub use series::{PricePoint, PriceSeries};

/// Ticker symbol of the benchmark index. Its beta is 1.00 by definition.
pub const BENCHMARK: &str = "SPY";
