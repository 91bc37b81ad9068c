//! A state's population and its snapshot history.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::metrics::per_million;
use crate::types::{Count, Snapshot};

/// Population plus snapshots keyed by their check timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateEntry {
    population: u64,
    snapshots: BTreeMap<NaiveDateTime, Snapshot>,
}

impl StateEntry {
    pub fn new(population: u64) -> Self {
        Self {
            population,
            snapshots: BTreeMap::new(),
        }
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn snapshots(&self) -> impl Iterator<Item = (&NaiveDateTime, &Snapshot)> {
        self.snapshots.iter()
    }

    /// Store `snapshot` at `ts`, replacing whatever was there.
    pub fn add_snapshot(&mut self, ts: NaiveDateTime, snapshot: Snapshot) -> Option<Snapshot> {
        self.snapshots.insert(ts, snapshot)
    }

    /// Most recent timestamp with a snapshot.
    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.snapshots.keys().next_back().copied()
    }

    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.values().next_back()
    }

    /// Snapshot at `at`, or the latest one when `at` is `None`.
    pub fn snapshot(&self, at: Option<NaiveDateTime>) -> Option<&Snapshot> {
        match at {
            Some(ts) => self.snapshots.get(&ts),
            None => self.latest_snapshot(),
        }
    }

    /// `count` per million residents for the selected snapshot.
    pub fn per_million(&self, count: Count, at: Option<NaiveDateTime>) -> Option<u64> {
        let snapshot = self.snapshot(at)?;
        per_million(snapshot.count(count), self.population)
    }

    pub fn tests_per_million(&self, at: Option<NaiveDateTime>) -> Option<u64> {
        self.per_million(Count::Tests, at)
    }

    pub fn positive_per_million(&self, at: Option<NaiveDateTime>) -> Option<u64> {
        self.per_million(Count::Positive, at)
    }

    pub fn hospitalized_per_million(&self, at: Option<NaiveDateTime>) -> Option<u64> {
        self.per_million(Count::Hospitalized, at)
    }

    pub fn dead_per_million(&self, at: Option<NaiveDateTime>) -> Option<u64> {
        self.per_million(Count::Dead, at)
    }

    /// Positives per ten thousand tests for the selected snapshot.
    pub fn positive_per_test_bp(&self, at: Option<NaiveDateTime>) -> Option<u64> {
        self.snapshot(at).map(Snapshot::positive_per_test_bp)
    }
}
