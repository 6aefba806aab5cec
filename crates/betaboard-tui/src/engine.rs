//! One compute run over the collected tickers
//!
//! A run is the whole pipeline for a single user interaction: fetch every
//! collected ticker in entry order, derive the annualized return and the beta
//! for each, and collect the chartable series. Each ticker is fetched once
//! per run and its series shared between the three consumers; the benchmark
//! is fetched at most once per run. Nothing is kept across runs.

use betaboard_core::{BENCHMARK, PriceSeries, TimePeriod, metrics};
use betaboard_data::PriceFetcher;

/// Message shown when the benchmark itself cannot be fetched, since that
/// blocks every beta in the run.
pub const BENCHMARK_UNAVAILABLE: &str =
    "No data available for SPY. Please check your internet connection.";

/// Empty-state line when no ticker produced anything chartable
pub const NO_VALID_TICKERS: &str =
    "No valid tickers entered. Please enter at least one valid ticker.";

/// Per-ticker results of a run
#[derive(Debug, Clone)]
pub struct TickerReport {
    pub ticker: String,
    /// Average annualized log-return, percent
    pub annual_return_pct: Option<f64>,
    pub beta: Option<f64>,
}

impl TickerReport {
    /// The display line for this ticker's beta, if there is one.
    pub fn beta_line(&self) -> Option<String> {
        if self.ticker == BENCHMARK {
            self.beta.map(|_| "Beta for SPY is 1.00".to_string())
        } else {
            self.beta
                .map(|beta| format!("Beta for {} is: {beta:.2}", self.ticker))
        }
    }
}

/// Everything one run produced
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub reports: Vec<TickerReport>,
    /// Per-ticker error lines, in occurrence order
    pub messages: Vec<String>,
    /// Valid tickers and their series, in entry order
    pub chart_series: Vec<(String, PriceSeries)>,
}

impl RunOutcome {
    pub fn beta_lines(&self) -> Vec<String> {
        self.reports.iter().filter_map(TickerReport::beta_line).collect()
    }

    /// Chart when any regression succeeded or the benchmark itself is among
    /// the valid tickers; otherwise the empty state is shown.
    pub fn has_chart(&self) -> bool {
        let any_beta = self
            .reports
            .iter()
            .any(|r| r.ticker != BENCHMARK && r.beta.is_some());
        let benchmark_valid = self.chart_series.iter().any(|(t, _)| t == BENCHMARK);
        any_beta || benchmark_valid
    }
}

/// Run the full pipeline for `tickers` over `period`.
///
/// Failures never abort the run: each one downgrades to an absent metric and
/// a message line, and processing moves on to the next ticker.
pub async fn run<F>(fetcher: &F, period: TimePeriod, tickers: &[String]) -> RunOutcome
where
    F: PriceFetcher + ?Sized,
{
    let mut outcome = RunOutcome::default();
    // benchmark series shared across the run; inner None records a failed
    // fetch so it is not retried within the run
    let mut benchmark: Option<Option<PriceSeries>> = None;

    for ticker in tickers {
        let series = match fetcher.fetch(ticker, period).await {
            Ok(series) => Some(series),
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "fetch failed");
                outcome.messages.push(err.to_string());
                None
            }
        };

        let annual_return_pct = series.as_ref().and_then(|s| {
            match metrics::annualized_return_pct(s) {
                Ok(pct) => Some(pct),
                Err(err) => {
                    tracing::warn!(%ticker, error = %err, "return calculation failed");
                    None
                }
            }
        });

        let beta = if ticker == BENCHMARK {
            // by definition, no fetch and no regression
            Some(1.0)
        } else if let Some(stock) = series.as_ref() {
            if benchmark.is_none() {
                benchmark = Some(match fetcher.fetch(BENCHMARK, period).await {
                    Ok(series) => Some(series),
                    Err(err) => {
                        tracing::warn!(error = %err, "benchmark fetch failed");
                        outcome.messages.push(BENCHMARK_UNAVAILABLE.to_string());
                        None
                    }
                });
            }

            match benchmark.as_ref().and_then(Option::as_ref) {
                Some(bench) => match metrics::beta_from_series(stock, bench) {
                    Ok(beta) => Some(beta),
                    Err(err) => {
                        tracing::warn!(%ticker, error = %err, "beta calculation failed");
                        outcome
                            .messages
                            .push(format!("An error occurred while calculating beta for {ticker}."));
                        None
                    }
                },
                None => None,
            }
        } else {
            None
        };

        tracing::info!(%ticker, annual = ?annual_return_pct, beta = ?beta, "computed metrics");

        if let (Some(_), Some(series)) = (annual_return_pct, series) {
            outcome.chart_series.push((ticker.clone(), series));
        }

        outcome.reports.push(TickerReport {
            ticker: ticker.clone(),
            annual_return_pct,
            beta,
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use betaboard_data::{FetchError, MockPriceFetcher};
    use chrono::{Days, NaiveDate};

    const TOLERANCE: f64 = 1e-9;

    /// Daily series starting 2024-01-01 with the given closes.
    fn series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::from_pairs(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (start + Days::new(i as u64), p)),
        )
    }

    fn expect_fetch(mock: &mut MockPriceFetcher, symbol: &'static str, prices: Vec<f64>) {
        mock.expect_fetch()
            .withf(move |s, _| s == symbol)
            .times(1)
            .returning(move |_, _| Ok(series(&prices)));
    }

    fn expect_fetch_failure(mock: &mut MockPriceFetcher, symbol: &'static str, err: FetchError) {
        mock.expect_fetch()
            .withf(move |s, _| s == symbol)
            .times(1)
            .returning(move |_, _| Err(err.clone()));
    }

    fn tickers(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_benchmark_beta_is_one_even_when_its_fetch_fails() {
        let mut mock = MockPriceFetcher::new();
        // only the per-ticker data fetch happens; the beta path adds none
        expect_fetch_failure(
            &mut mock,
            "SPY",
            FetchError::Provider {
                symbol: "SPY".to_string(),
                reason: "offline".to_string(),
            },
        );

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["SPY"])).await;

        assert_eq!(outcome.reports[0].beta, Some(1.0));
        assert_eq!(outcome.beta_lines(), vec!["Beta for SPY is 1.00"]);
        assert!(outcome.reports[0].annual_return_pct.is_none());
        assert!(!outcome.has_chart());
    }

    #[tokio::test]
    async fn test_single_ticker_fetches_each_symbol_exactly_once() {
        let mut mock = MockPriceFetcher::new();
        expect_fetch(&mut mock, "AAPL", vec![100.0, 102.0, 101.0, 105.0]);
        expect_fetch(&mut mock, "SPY", vec![400.0, 401.0, 399.0, 404.0]);

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["AAPL"])).await;

        assert!(outcome.messages.is_empty());
        assert!(outcome.reports[0].annual_return_pct.is_some());
        assert!(outcome.reports[0].beta.is_some());
        assert_eq!(outcome.chart_series.len(), 1);
        assert_eq!(outcome.chart_series[0].0, "AAPL");
        assert!(outcome.has_chart());
    }

    #[tokio::test]
    async fn test_duplicate_entries_refetch_within_the_run() {
        let mut mock = MockPriceFetcher::new();
        mock.expect_fetch()
            .withf(|s, _| s == "AAPL")
            .times(2)
            .returning(|_, _| Ok(series(&[100.0, 102.0, 101.0])));
        expect_fetch(&mut mock, "SPY", vec![400.0, 401.0, 399.0]);

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["AAPL", "AAPL"])).await;

        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.chart_series.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_ticker_reports_while_others_compute() {
        let mut mock = MockPriceFetcher::new();
        expect_fetch(&mut mock, "AAPL", vec![100.0, 102.0, 101.0, 105.0]);
        expect_fetch_failure(
            &mut mock,
            "ZZZZZZ",
            FetchError::NoData {
                symbol: "ZZZZZZ".to_string(),
            },
        );
        expect_fetch(&mut mock, "SPY", vec![400.0, 401.0, 399.0, 404.0]);

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["AAPL", "ZZZZZZ"])).await;

        assert!(outcome.messages.contains(
            &"No data available for ZZZZZZ. Please enter a valid ticker.".to_string()
        ));
        assert!(outcome.reports[0].beta.is_some());
        assert!(outcome.reports[1].beta.is_none());
        assert!(outcome.reports[1].beta_line().is_none());
        assert_eq!(outcome.chart_series.len(), 1);
    }

    #[tokio::test]
    async fn test_benchmark_failure_reported_once_and_blocks_all_betas() {
        let mut mock = MockPriceFetcher::new();
        expect_fetch(&mut mock, "AAPL", vec![100.0, 102.0, 101.0]);
        expect_fetch(&mut mock, "MSFT", vec![300.0, 303.0, 299.0]);
        expect_fetch_failure(
            &mut mock,
            "SPY",
            FetchError::Provider {
                symbol: "SPY".to_string(),
                reason: "offline".to_string(),
            },
        );

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["AAPL", "MSFT"])).await;

        let benchmark_lines = outcome
            .messages
            .iter()
            .filter(|m| *m == BENCHMARK_UNAVAILABLE)
            .count();
        assert_eq!(benchmark_lines, 1);
        assert!(outcome.reports.iter().all(|r| r.beta.is_none()));
        // both series were usable, so they stay valid; still nothing to chart
        assert_eq!(outcome.chart_series.len(), 2);
        assert!(!outcome.has_chart());
    }

    #[tokio::test]
    async fn test_short_series_fails_both_metrics_with_beta_message() {
        let mut mock = MockPriceFetcher::new();
        expect_fetch(&mut mock, "ONE", vec![42.0]);
        expect_fetch(&mut mock, "SPY", vec![400.0, 401.0, 399.0]);

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["ONE"])).await;

        assert!(outcome.reports[0].annual_return_pct.is_none());
        assert!(outcome.reports[0].beta.is_none());
        assert!(outcome.messages.contains(
            &"An error occurred while calculating beta for ONE.".to_string()
        ));
        assert!(!outcome.has_chart());
    }

    #[tokio::test]
    async fn test_correlated_returns_recover_scale_factor() {
        // stock log-returns are exactly 2x the benchmark's
        let bench_prices: Vec<f64> = vec![100.0, 102.0, 99.0, 103.0, 101.0];
        let stock_prices: Vec<f64> = {
            let mut prices = vec![50.0];
            for w in bench_prices.windows(2) {
                let r = (w[1] / w[0]).ln() * 2.0;
                let last = *prices.last().unwrap();
                prices.push(last * r.exp());
            }
            prices
        };

        let mut mock = MockPriceFetcher::new();
        expect_fetch(&mut mock, "LEV", stock_prices);
        expect_fetch(&mut mock, "SPY", bench_prices);

        let outcome = run(&mock, TimePeriod::OneYear, &tickers(&["LEV"])).await;

        let beta = outcome.reports[0].beta.unwrap();
        assert!((beta - 2.0).abs() < TOLERANCE);
        assert_eq!(outcome.beta_lines(), vec!["Beta for LEV is: 2.00"]);
    }

    #[tokio::test]
    async fn test_empty_ticker_list_fetches_nothing() {
        let mock = MockPriceFetcher::new();

        let outcome = run(&mock, TimePeriod::OneYear, &[]).await;

        assert!(outcome.reports.is_empty());
        assert!(outcome.messages.is_empty());
        assert!(!outcome.has_chart());
    }
}
