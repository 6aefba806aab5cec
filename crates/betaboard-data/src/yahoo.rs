//! Yahoo Finance price fetcher

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use crate::fetcher::{FetchError, PriceFetcher};
use betaboard_core::{PricePoint, PriceSeries, TimePeriod};

/// Fetches daily adjusted closes from Yahoo Finance.
///
/// Stateless by design: every call builds a fresh connector and performs
/// exactly one provider request, so nothing is shared or cached between runs.
#[derive(Debug, Default)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl PriceFetcher for YahooFinanceClient {
    async fn fetch(&self, symbol: &str, period: TimePeriod) -> Result<PriceSeries, FetchError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            // the session filters blank slots before fetching; treat a stray
            // blank like an unknown symbol rather than panicking
            return Err(FetchError::NoData { symbol });
        }

        tracing::debug!(%symbol, period = %period, "fetching adjusted closes");

        let provider = yahoo::YahooConnector::new().map_err(|e| FetchError::Provider {
            symbol: symbol.clone(),
            reason: e.to_string(),
        })?;

        let (start, end) = period_bounds(period, Utc::now());
        let start_odt = to_offset(start, &symbol)?;
        let end_odt = to_offset(end, &symbol)?;

        let response = provider
            .get_quote_history(&symbol, start_odt, end_odt)
            .await
            .map_err(|e| {
                tracing::warn!(%symbol, error = %e, "quote history request failed");
                FetchError::Provider {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                }
            })?;

        // the provider signals an empty result set through the quotes
        // accessor rather than the request itself
        let quotes = response.quotes().map_err(|e| {
            tracing::warn!(%symbol, error = %e, "no quotes in response");
            FetchError::NoData {
                symbol: symbol.clone(),
            }
        })?;

        if quotes.is_empty() {
            return Err(FetchError::NoData { symbol });
        }

        let points: Vec<PricePoint> = quotes
            .iter()
            .filter(|q| q.adjclose.is_finite())
            .filter_map(|q| {
                let date = timestamp_to_date(q.timestamp as i64)?;
                Some(PricePoint {
                    date,
                    adj_close: q.adjclose,
                })
            })
            .collect();

        // rows existed but none carried a usable adjusted close
        if points.is_empty() {
            return Err(FetchError::MissingAdjClose { symbol });
        }

        Ok(PriceSeries::new(points))
    }
}

/// Convert a lookback period into a concrete fetch window ending at `now`.
fn period_bounds(period: TimePeriod, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = match period {
        TimePeriod::FiveDays => now - Duration::days(5),
        TimePeriod::OneMonth => now - Duration::days(30),
        TimePeriod::ThreeMonths => now - Duration::days(90),
        TimePeriod::SixMonths => now - Duration::days(180),
        TimePeriod::OneYear => now - Duration::days(365),
        TimePeriod::TwoYears => now - Duration::days(730),
        TimePeriod::FiveYears => now - Duration::days(1825),
        TimePeriod::TenYears => now - Duration::days(3650),
        TimePeriod::TwentyYears => now - Duration::days(7300),
        TimePeriod::YearToDate => NaiveDate::from_ymd_opt(now.year(), 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or(now - Duration::days(365), |d| d.and_utc()),
        TimePeriod::Max => now - Duration::days(36500), // ~100 years
    };

    (start, now)
}

fn to_offset(dt: DateTime<Utc>, symbol: &str) -> Result<OffsetDateTime, FetchError> {
    OffsetDateTime::from_unix_timestamp(dt.timestamp()).map_err(|e| FetchError::Provider {
        symbol: symbol.to_string(),
        reason: format!("invalid timestamp: {e}"),
    })
}

fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}
