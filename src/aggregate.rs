//! Nationwide aggregate entry and worst-case extrapolations.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    metrics::extrapolate,
    registry::Registry,
    types::{Count, Snapshot, StateEntry},
};

/// Counts projected nationwide from the worst per-million rate.
pub const EXTRAPOLATED_COUNTS: [Count; 3] = [Count::Positive, Count::Hospitalized, Count::Dead];

/// Sum every real state into one entry.
///
/// Population is the total of all states. The single snapshot sits at the
/// latest timestamp ingested and holds per-field sums of each state's latest
/// snapshot. States without snapshots add population only.
pub fn build_aggregate(registry: &Registry) -> StateEntry {
    let mut population = 0;
    let mut latest = Vec::new();
    for (code, entry) in registry.states() {
        population = entry.population().saturating_add(population);
        match entry.latest_snapshot() {
            Some(snapshot) => latest.push(snapshot),
            None => warn!(state = code, "No snapshots reported"),
        }
    }

    let mut aggregate = StateEntry::new(population);
    if let Some(ts) = registry.latest_seen() {
        let total: Snapshot = latest.into_iter().sum();
        aggregate.add_snapshot(ts, total);
    }
    aggregate
}

impl Registry {
    /// Build the aggregate entry and store it under the reserved code.
    ///
    /// Rebuilding replaces the previous aggregate; it never sums itself.
    pub fn insert_aggregate(&mut self) -> &StateEntry {
        let aggregate = build_aggregate(self);
        info!(
            population = aggregate.population(),
            states = self.states().count(),
            "Built nationwide aggregate"
        );
        self.insert_aggregate_entry(aggregate)
    }

    /// Population the extrapolations are projected onto.
    pub fn total_population(&self) -> u64 {
        match self.aggregate() {
            Some(aggregate) => aggregate.population(),
            None => self
                .states()
                .fold(0, |total: u64, (_, entry)| total.saturating_add(entry.population())),
        }
    }
}

/// Worst observed rate for one count, projected onto the whole population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extrapolation {
    pub count: Count,
    /// Highest per-million rate found
    pub per_million: u64,
    /// Registry code the rate came from
    pub source: String,
    /// `round(total_population * per_million / 1e6)`
    pub projected: u64,
}

impl Extrapolation {
    /// Report line, e.g. `Worst infected rate 100/M (A) -> 150 infected nationwide`.
    pub fn sentence(&self) -> String {
        let label = self.count.label();
        format!(
            "Worst {label} rate {}/M ({}) -> {} {label} nationwide",
            self.per_million, self.source, self.projected
        )
    }
}

/// One extrapolation per count in [`EXTRAPOLATED_COUNTS`].
///
/// The worst-scan covers the aggregate entry too. The aggregate's rate is a
/// population-weighted mean of the states, so it can only win when nothing
/// earlier in the registry ties it.
pub fn extrapolations(registry: &Registry) -> Vec<Extrapolation> {
    let population = registry.total_population();
    EXTRAPOLATED_COUNTS
        .iter()
        .filter_map(|&count| {
            let (source, per_million) = registry.worst_by(count)?;
            Some(Extrapolation {
                count,
                per_million,
                source: source.to_string(),
                projected: extrapolate(population, per_million),
            })
        })
        .collect()
}
