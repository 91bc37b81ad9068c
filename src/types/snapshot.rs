//! Daily cumulative counts for one state.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

use crate::metrics::per_ten_thousand;

/// A count a per-capita metric can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Count {
    /// Positive + negative results
    Tests,
    Positive,
    Negative,
    Pending,
    Hospitalized,
    Dead,
}

impl Count {
    /// Noun used in report lines.
    pub fn label(self) -> &'static str {
        match self {
            Count::Tests => "tested",
            Count::Positive => "infected",
            Count::Negative => "negative",
            Count::Pending => "pending",
            Count::Hospitalized => "hospitalized",
            Count::Dead => "dead",
        }
    }
}

/// One day's reported counts. Missing values are stored as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub positive: u64,
    pub negative: u64,
    pub pending: u64,
    pub hospitalized: u64,
    pub dead: u64,
}

impl Snapshot {
    pub fn new(positive: u64, negative: u64, pending: u64, hospitalized: u64, dead: u64) -> Self {
        Self {
            positive,
            negative,
            pending,
            hospitalized,
            dead,
        }
    }

    /// Completed tests: positive plus negative. Pending results are not tests yet.
    pub fn tests(&self) -> u64 {
        self.positive.saturating_add(self.negative)
    }

    pub fn count(&self, count: Count) -> u64 {
        match count {
            Count::Tests => self.tests(),
            Count::Positive => self.positive,
            Count::Negative => self.negative,
            Count::Pending => self.pending,
            Count::Hospitalized => self.hospitalized,
            Count::Dead => self.dead,
        }
    }

    /// Positives per ten thousand tests, 0 when nothing has been tested.
    pub fn positive_per_test_bp(&self) -> u64 {
        per_ten_thousand(self.positive, self.tests())
    }
}

/// Per-field sum, saturating at `u64::MAX`.
impl Add for Snapshot {
    type Output = Snapshot;

    fn add(self, rhs: Snapshot) -> Snapshot {
        Snapshot {
            positive: self.positive.saturating_add(rhs.positive),
            negative: self.negative.saturating_add(rhs.negative),
            pending: self.pending.saturating_add(rhs.pending),
            hospitalized: self.hospitalized.saturating_add(rhs.hospitalized),
            dead: self.dead.saturating_add(rhs.dead),
        }
    }
}

impl<'a> Sum<&'a Snapshot> for Snapshot {
    fn sum<I: Iterator<Item = &'a Snapshot>>(iter: I) -> Snapshot {
        iter.fold(Snapshot::default(), |acc, s| acc + *s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tests_is_positive_plus_negative() {
        let snap = Snapshot::new(100, 900, 37, 10, 1);
        assert_eq!(snap.tests(), 1000);
        assert_eq!(snap.count(Count::Tests), 1000);
        assert_eq!(snap.count(Count::Pending), 37);
    }

    #[test]
    fn test_positive_per_test_bp() {
        let snap = Snapshot::new(100, 900, 0, 0, 0);
        assert_eq!(snap.positive_per_test_bp(), 1000);

        let third = Snapshot::new(1, 2, 0, 0, 0);
        assert_eq!(third.positive_per_test_bp(), 3333);
    }

    #[test]
    fn test_positive_per_test_bp_zero_without_tests() {
        assert_eq!(Snapshot::default().positive_per_test_bp(), 0);
        // Pending results alone do not count as tests
        let pending_only = Snapshot::new(0, 0, 50, 3, 0);
        assert_eq!(pending_only.positive_per_test_bp(), 0);
    }

    #[test]
    fn test_near_max_counts_saturate() {
        let huge = Snapshot::new(u64::MAX, 1, 0, 0, 0);
        assert_eq!(huge.tests(), u64::MAX);
        assert_eq!(huge.positive_per_test_bp(), 10_000);

        let total: Snapshot = [huge, Snapshot::new(5, 5, 0, 0, 0)].iter().sum();
        assert_eq!(total.positive, u64::MAX);
        assert_eq!(total.negative, 6);
    }

    #[test]
    fn test_sum_is_per_field() {
        let snaps = [
            Snapshot::new(100, 900, 5, 10, 1),
            Snapshot::new(50, 450, 0, 2, 0),
        ];
        let total: Snapshot = snaps.iter().sum();
        assert_eq!(total, Snapshot::new(150, 1350, 5, 12, 1));
    }
}
