//! Error types for metric computations

use thiserror::Error;

/// Errors produced by return and beta calculations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// Not enough data points for the computation
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A price at or below zero has no logarithm
    #[error("non-positive price {price} on {date}")]
    NonPositivePrice { date: chrono::NaiveDate, price: f64 },

    /// Stock and benchmark series share no dates
    #[error("no overlapping dates between the two series")]
    EmptyIntersection,

    /// Regressor has zero variance, the slope is undefined
    #[error("regression is degenerate: benchmark returns have zero variance")]
    DegenerateRegression,
}

/// Result type alias for metric computations
pub type Result<T> = std::result::Result<T, MetricsError>;
