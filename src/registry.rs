//! State registry: every state's population and snapshots for one run.
//!
//! Built sequentially (populations, then API records, then the aggregate) and
//! read-only afterwards. Iteration follows insertion order, which is the row
//! order of the population table.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    consts::AGGREGATE_CODE,
    prelude::*,
    tracking::response_structs::DailyRecord,
    types::{Count, Snapshot, StateEntry},
    Error,
};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    states: IndexMap<String, StateEntry>,
    latest_seen: Option<NaiveDateTime>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state with no snapshots. A repeated code replaces the earlier row.
    pub fn insert_state(&mut self, code: impl Into<String>, population: u64) -> Result<()> {
        let code = code.into();
        if code == AGGREGATE_CODE {
            return Err(Error::ReservedStateCode(code));
        }
        self.states.insert(code, StateEntry::new(population));
        Ok(())
    }

    /// Record a snapshot for a state that is already registered.
    pub fn add_snapshot(
        &mut self,
        code: &str,
        ts: NaiveDateTime,
        snapshot: Snapshot,
    ) -> Result<()> {
        let entry = self
            .states
            .get_mut(code)
            .ok_or_else(|| Error::UnknownState(code.to_string()))?;
        if entry.add_snapshot(ts, snapshot).is_some() {
            debug!(state = code, %ts, "Replaced snapshot at existing timestamp");
        }
        self.latest_seen = self.latest_seen.max(Some(ts));
        Ok(())
    }

    /// Ingest one API record.
    pub fn ingest(&mut self, record: &DailyRecord) -> Result<()> {
        let ts = record.checked_at()?;
        self.add_snapshot(&record.state, ts, record.snapshot())
    }

    /// Latest timestamp across every snapshot ingested so far.
    pub fn latest_seen(&self) -> Option<NaiveDateTime> {
        self.latest_seen
    }

    pub fn get(&self, code: &str) -> Option<&StateEntry> {
        self.states.get(code)
    }

    pub fn aggregate(&self) -> Option<&StateEntry> {
        self.states.get(AGGREGATE_CODE)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All entries in insertion order, the aggregate included once inserted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateEntry)> {
        self.states.iter().map(|(code, entry)| (code.as_str(), entry))
    }

    /// Entries other than the aggregate.
    pub fn states(&self) -> impl Iterator<Item = (&str, &StateEntry)> {
        self.iter().filter(|(code, _)| *code != AGGREGATE_CODE)
    }

    /// Entries ascending by population; equal populations keep insertion order.
    pub fn by_population(&self) -> Vec<(&str, &StateEntry)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.population());
        entries
    }

    /// Entry with the highest latest per-million rate for `count`.
    ///
    /// Scans every entry, the aggregate included. The first entry wins ties.
    /// Entries without a rate (no snapshots, zero population) are skipped.
    pub fn worst_by(&self, count: Count) -> Option<(&str, u64)> {
        let mut worst: Option<(&str, u64)> = None;
        for (code, entry) in self.iter() {
            let Some(rate) = entry.per_million(count, None) else {
                continue;
            };
            if worst.is_none_or(|(_, best)| rate > best) {
                worst = Some((code, rate));
            }
        }
        worst
    }

    pub(crate) fn insert_aggregate_entry(&mut self, entry: StateEntry) -> &StateEntry {
        let slot = self.states.entry(AGGREGATE_CODE.to_string()).or_default();
        *slot = entry;
        slot
    }
}
