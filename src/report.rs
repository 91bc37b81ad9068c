//! Report assembly and rendering.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::{self, Write};

use crate::{
    aggregate::{extrapolations, Extrapolation},
    prelude::*,
    registry::Registry,
    types::StateEntry,
    Error,
};

/// One line of the per-state table. Rates are absent for entries without snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub code: String,
    pub population: u64,
    pub snapshots: usize,
    pub tests_per_million: Option<u64>,
    pub positive_per_million: Option<u64>,
    pub hospitalized_per_million: Option<u64>,
    pub dead_per_million: Option<u64>,
    /// Positives per ten thousand tests
    pub positive_per_test_bp: Option<u64>,
}

impl ReportRow {
    fn new(code: &str, entry: &StateEntry) -> Self {
        Self {
            code: code.to_string(),
            population: entry.population(),
            snapshots: entry.snapshot_count(),
            tests_per_million: entry.tests_per_million(None),
            positive_per_million: entry.positive_per_million(None),
            hospitalized_per_million: entry.hospitalized_per_million(None),
            dead_per_million: entry.dead_per_million(None),
            positive_per_test_bp: entry.positive_per_test_bp(None),
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<2}  {:>10}=pop  {:>4}=snaps  {:>6}=tests/M  {:>5}=pos/M  {:>4}=hosp/M  {:>4}=dead/M  {:>5}=pos/10k",
            self.code,
            self.population,
            self.snapshots,
            cell(self.tests_per_million),
            cell(self.positive_per_million),
            cell(self.hospitalized_per_million),
            cell(self.dead_per_million),
            cell(self.positive_per_test_bp),
        )
    }
}

fn cell(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Latest check time across all ingested records
    pub as_of: Option<NaiveDateTime>,
    pub total_population: u64,
    /// Ascending by population
    pub rows: Vec<ReportRow>,
    pub extrapolations: Vec<Extrapolation>,
}

impl Report {
    /// Snapshot the registry into a report. Call after the aggregate is inserted.
    pub fn build(registry: &Registry) -> Self {
        let rows = registry
            .by_population()
            .into_iter()
            .map(|(code, entry)| ReportRow::new(code, entry))
            .collect();
        Self {
            as_of: registry.latest_seen(),
            total_population: registry.total_population(),
            rows,
            extrapolations: extrapolations(registry),
        }
    }

    /// Table, blank line, then one extrapolation sentence per line.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.rows {
            row.write_text(out)?;
        }
        writeln!(out)?;
        for extrapolation in &self.extrapolations {
            writeln!(out, "{}", extrapolation.sentence())?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_text(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::json_parse(e.to_string()))
    }
}
