//! Return and beta calculations
//!
//! Two formulas drive the dashboard: the annualized mean of daily log-returns
//! (`ln(p[t] / p[t-1])`, scaled by 252 trading days) and market beta, the
//! slope of an ordinary-least-squares fit of a stock's log-returns against
//! the benchmark's over their shared dates.

use crate::error::{MetricsError, Result};
use crate::series::{AlignedPair, PriceSeries};

/// Assumed number of trading days per year for annualization
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Result of a degree-1 least-squares fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Average annualized log-return of a price series, as a percentage.
///
/// A series of fewer than two points has no returns to average and is
/// rejected, as is any series containing a price at or below zero.
pub fn annualized_return_pct(series: &PriceSeries) -> Result<f64> {
    if series.len() < 2 {
        return Err(MetricsError::InsufficientData {
            required: 2,
            actual: series.len(),
        });
    }

    for point in series.points() {
        if point.adj_close <= 0.0 {
            return Err(MetricsError::NonPositivePrice {
                date: point.date,
                price: point.adj_close,
            });
        }
    }

    let returns = log_returns(&series.adj_closes());
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;

    Ok(mean * TRADING_DAYS_PER_YEAR * 100.0)
}

/// Market beta of `stock` against `benchmark`.
///
/// The two series are inner-joined on date, log-returns are taken on both
/// aligned columns, and the OLS slope of stock return on benchmark return is
/// the beta. The intercept is computed and discarded.
pub fn beta_from_series(stock: &PriceSeries, benchmark: &PriceSeries) -> Result<f64> {
    let aligned = stock.align(benchmark);
    if aligned.is_empty() {
        return Err(MetricsError::EmptyIntersection);
    }
    if aligned.len() < 2 {
        return Err(MetricsError::InsufficientData {
            required: 2,
            actual: aligned.len(),
        });
    }

    check_positive(&aligned)?;

    let stock_prices: Vec<f64> = aligned.iter().map(|p| p.left).collect();
    let bench_prices: Vec<f64> = aligned.iter().map(|p| p.right).collect();

    let stock_returns = log_returns(&stock_prices);
    let bench_returns = log_returns(&bench_prices);

    let fit = ols_fit(&bench_returns, &stock_returns)?;
    Ok(fit.slope)
}

/// Ordinary least squares fit of `y` as a function of `x`.
pub fn ols_fit(x: &[f64], y: &[f64]) -> Result<OlsFit> {
    debug_assert_eq!(x.len(), y.len());

    if x.len() < 2 {
        return Err(MetricsError::InsufficientData {
            required: 2,
            actual: x.len(),
        });
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x2: f64 = x.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return Err(MetricsError::DegenerateRegression);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(OlsFit { slope, intercept })
}

/// Log-returns of consecutive prices, first entry dropped.
///
/// Callers validate positivity beforehand so every ratio has a logarithm.
fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

fn check_positive(aligned: &[AlignedPair]) -> Result<()> {
    for pair in aligned {
        for price in [pair.left, pair.right] {
            if price <= 0.0 {
                return Err(MetricsError::NonPositivePrice {
                    date: pair.date,
                    price,
                });
            }
        }
    }
    Ok(())
}
