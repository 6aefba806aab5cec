//! Fetcher seam between the dashboard and the market-data provider

use async_trait::async_trait;
use betaboard_core::{PriceSeries, TimePeriod};
use thiserror::Error;

/// Ways a fetch can fail, one variant per user-visible condition.
///
/// The `Display` strings are exactly what the session shows next to the
/// ticker, so callers report a failure by formatting the error and moving on
/// to the next ticker. No variant ever terminates a run.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Provider answered but had no rows for the symbol
    #[error("No data available for {symbol}. Please enter a valid ticker.")]
    NoData { symbol: String },

    /// Rows came back without a usable adjusted-close value
    #[error("Data for {symbol} is not available.")]
    MissingAdjClose { symbol: String },

    /// Transport or provider failure, reported with a generic message
    #[error("An error occurred while fetching data for {symbol}.")]
    Provider { symbol: String, reason: String },
}

impl FetchError {
    /// Symbol the failed fetch was for
    pub fn symbol(&self) -> &str {
        match self {
            FetchError::NoData { symbol }
            | FetchError::MissingAdjClose { symbol }
            | FetchError::Provider { symbol, .. } => symbol,
        }
    }
}

/// Source of adjusted-close price history.
///
/// One invocation is one provider call over the given lookback period. The
/// period is always passed explicitly so computations stay independently
/// testable against a scripted fetcher.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch(&self, symbol: &str, period: TimePeriod) -> Result<PriceSeries, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_user_facing_messages() {
        let err = FetchError::NoData {
            symbol: "ZZZZZZ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No data available for ZZZZZZ. Please enter a valid ticker."
        );

        let err = FetchError::MissingAdjClose {
            symbol: "AAPL".to_string(),
        };
        assert_eq!(err.to_string(), "Data for AAPL is not available.");

        let err = FetchError::Provider {
            symbol: "AAPL".to_string(),
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "An error occurred while fetching data for AAPL."
        );
    }

    #[test]
    fn test_symbol_accessor() {
        let err = FetchError::Provider {
            symbol: "MSFT".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(err.symbol(), "MSFT");
    }
}
