//! Date-indexed adjusted-close price series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation: date and adjusted closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub adj_close: f64,
}

/// Ordered sequence of daily adjusted closes, strictly increasing by date.
///
/// Construction normalizes whatever the provider returned: points are sorted
/// by date and duplicate dates are collapsed, last row wins. A series is
/// produced fresh per fetch and never cached across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

/// A date present in both series, with the price from each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    pub date: NaiveDate,
    pub left: f64,
    pub right: f64,
}

impl PriceSeries {
    /// Build a series from raw provider rows, normalizing order and
    /// collapsing duplicate dates.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by(|next, prev| {
            if next.date == prev.date {
                // last row wins
                prev.adj_close = next.adj_close;
                true
            } else {
                false
            }
        });
        Self { points }
    }

    /// Convenience constructor from `(date, adj_close)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, adj_close)| PricePoint { date, adj_close })
                .collect(),
        )
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Adjusted closes in date order
    pub fn adj_closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.adj_close).collect()
    }

    /// Inner join with another series on date.
    ///
    /// Only dates present in both series survive; `left` carries prices from
    /// `self`, `right` from `other`. Both inputs are strictly increasing by
    /// date, so a single forward merge suffices.
    pub fn align(&self, other: &Self) -> Vec<AlignedPair> {
        let mut pairs = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.points.len() && j < other.points.len() {
            let (a, b) = (&self.points[i], &other.points[j]);
            match a.date.cmp(&b.date) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    pairs.push(AlignedPair {
                        date: a.date,
                        left: a.adj_close,
                        right: b.adj_close,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_sorts_by_date() {
        let series = PriceSeries::from_pairs([
            (date(2024, 1, 3), 3.0),
            (date(2024, 1, 1), 1.0),
            (date(2024, 1, 2), 2.0),
        ]);

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
    }

    #[test]
    fn test_new_collapses_duplicate_dates_last_wins() {
        let series = PriceSeries::from_pairs([
            (date(2024, 1, 1), 1.0),
            (date(2024, 1, 2), 2.0),
            (date(2024, 1, 2), 5.0),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].adj_close, 5.0);
    }

    #[test]
    fn test_align_keeps_only_shared_dates() {
        let stock = PriceSeries::from_pairs([
            (date(2024, 1, 1), 10.0),
            (date(2024, 1, 2), 11.0),
            (date(2024, 1, 4), 12.0),
        ]);
        let bench = PriceSeries::from_pairs([
            (date(2024, 1, 2), 100.0),
            (date(2024, 1, 3), 101.0),
            (date(2024, 1, 4), 102.0),
        ]);

        let aligned = stock.align(&bench);
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].date, date(2024, 1, 2));
        assert_eq!(aligned[0].left, 11.0);
        assert_eq!(aligned[0].right, 100.0);
        assert_eq!(aligned[1].date, date(2024, 1, 4));
    }

    #[test]
    fn test_align_disjoint_series_is_empty() {
        let a = PriceSeries::from_pairs([(date(2024, 1, 1), 1.0)]);
        let b = PriceSeries::from_pairs([(date(2024, 1, 2), 2.0)]);
        assert!(a.align(&b).is_empty());
    }

    #[test]
    fn test_align_with_itself_keeps_everything() {
        let series = PriceSeries::from_pairs([
            (date(2024, 1, 1), 1.0),
            (date(2024, 1, 2), 2.0),
            (date(2024, 1, 3), 3.0),
        ]);

        let aligned = series.align(&series);
        assert_eq!(aligned.len(), 3);
        assert!(aligned.iter().all(|p| p.left == p.right));
    }
}
