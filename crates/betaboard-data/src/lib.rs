//! Market-data access for the betaboard dashboard
//!
//! Exposes the `PriceFetcher` seam the interactive session talks to, and the
//! Yahoo Finance implementation behind it. Every fetch is one provider call;
//! there is no retry, no backoff and no caching, so repeated runs always see
//! fresh data.

pub mod fetcher;
pub mod yahoo;

// Re-export main types for convenience
pub use fetcher::{FetchError, PriceFetcher};
pub use yahoo::YahooFinanceClient;

#[cfg(feature = "mocks")]
pub use fetcher::MockPriceFetcher;
