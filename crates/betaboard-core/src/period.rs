//! Lookback periods for historical data fetches

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed set of lookback windows offered by the period selector.
///
/// One period applies uniformly to every fetch in a run. The wire tokens
/// match what the upstream provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    TwentyYears,
    YearToDate,
    Max,
}

/// Failed to parse a period token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time period: {0}")]
pub struct ParsePeriodError(pub String);

impl TimePeriod {
    /// All periods in selector order, shortest lookback first.
    pub const ALL: [TimePeriod; 11] = [
        TimePeriod::FiveDays,
        TimePeriod::OneMonth,
        TimePeriod::ThreeMonths,
        TimePeriod::SixMonths,
        TimePeriod::OneYear,
        TimePeriod::TwoYears,
        TimePeriod::FiveYears,
        TimePeriod::TenYears,
        TimePeriod::TwentyYears,
        TimePeriod::YearToDate,
        TimePeriod::Max,
    ];

    /// Provider token for this period
    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::FiveDays => "5d",
            TimePeriod::OneMonth => "1mo",
            TimePeriod::ThreeMonths => "3mo",
            TimePeriod::SixMonths => "6mo",
            TimePeriod::OneYear => "1y",
            TimePeriod::TwoYears => "2y",
            TimePeriod::FiveYears => "5y",
            TimePeriod::TenYears => "10y",
            TimePeriod::TwentyYears => "20y",
            TimePeriod::YearToDate => "ytd",
            TimePeriod::Max => "max",
        }
    }

    /// Human-readable label for the selector
    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::FiveDays => "5 days",
            TimePeriod::OneMonth => "1 month",
            TimePeriod::ThreeMonths => "3 months",
            TimePeriod::SixMonths => "6 months",
            TimePeriod::OneYear => "1 year",
            TimePeriod::TwoYears => "2 years",
            TimePeriod::FiveYears => "5 years",
            TimePeriod::TenYears => "10 years",
            TimePeriod::TwentyYears => "20 years",
            TimePeriod::YearToDate => "year to date",
            TimePeriod::Max => "max available",
        }
    }

    /// Next period in selector order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous period in selector order, wrapping around.
    pub fn previous(self) -> Self {
        let idx = Self::ALL
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for TimePeriod {
    fn default() -> Self {
        TimePeriod::TenYears
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_years() {
        assert_eq!(TimePeriod::default(), TimePeriod::TenYears);
    }

    #[test]
    fn test_token_round_trip() {
        for period in TimePeriod::ALL {
            assert_eq!(period.as_str().parse::<TimePeriod>(), Ok(period));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        assert!("3y".parse::<TimePeriod>().is_err());
        assert!("".parse::<TimePeriod>().is_err());
    }

    #[test]
    fn test_selector_cycle_covers_all() {
        let mut period = TimePeriod::FiveDays;
        for expected in TimePeriod::ALL {
            assert_eq!(period, expected);
            period = period.next();
        }
        assert_eq!(period, TimePeriod::FiveDays);
    }

    #[test]
    fn test_next_previous_are_inverse() {
        for period in TimePeriod::ALL {
            assert_eq!(period.next().previous(), period);
        }
    }
}
