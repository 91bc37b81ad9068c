//! Population table loader.
//!
//! Reads a CSV with a header row naming at least `State` and `Population`
//! columns and seeds a [`Registry`] with one empty entry per row.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::{prelude::*, registry::Registry, Error};

#[derive(Debug, Deserialize)]
struct PopulationRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Population")]
    population: String,
}

/// Seed a registry from CSV read out of `reader`.
///
/// `source` names the input in error messages.
pub fn load_populations<R: Read>(reader: R, source: &str) -> Result<Registry> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut registry = Registry::new();
    for row in csv_reader.deserialize::<PopulationRow>() {
        let row = row.map_err(|e| Error::PopulationSource {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        let population = row
            .population
            .parse::<u64>()
            .map_err(|_| Error::InvalidPopulation {
                state: row.state.clone(),
                value: row.population.clone(),
            })?;
        registry.insert_state(row.state, population)?;
    }
    Ok(registry)
}

/// Seed a registry from the CSV file at `path`.
///
/// The file is read to the end and closed before this returns.
pub fn load_populations_file(path: &Path) -> Result<Registry> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::PopulationSource {
        path: source.clone(),
        message: e.to_string(),
    })?;
    let registry = load_populations(file, &source)?;
    info!(path = %source, states = registry.len(), "Loaded population table");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_rows_in_order() {
        let csv = "State,Population\nCA,39512223\nWY, 578759\nVT,623989\n";
        let registry = load_populations(csv.as_bytes(), "inline").unwrap();

        assert_eq!(registry.len(), 3);
        let codes: Vec<&str> = registry.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["CA", "WY", "VT"]);
        assert_eq!(registry.get("WY").unwrap().population(), 578_759);
        assert_eq!(registry.get("CA").unwrap().snapshot_count(), 0);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "Name,State,Population\nWashington,WA,7614893\n";
        let registry = load_populations(csv.as_bytes(), "inline").unwrap();
        assert_eq!(registry.get("WA").unwrap().population(), 7_614_893);
    }

    #[test]
    fn test_bad_population_is_fatal() {
        let csv = "State,Population\nCA,39512223\nTX,lots\n";
        let err = load_populations(csv.as_bytes(), "inline").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPopulation { ref state, ref value } if state == "TX" && value == "lots"
        ));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "State,People\nCA,39512223\n";
        let err = load_populations(csv.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, Error::PopulationSource { ref path, .. } if path == "inline"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_populations_file(&dir.path().join("populations.csv")).unwrap_err();
        assert!(matches!(err, Error::PopulationSource { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "State,Population").unwrap();
        writeln!(file, "NY,19453561").unwrap();
        file.flush().unwrap();

        let registry = load_populations_file(file.path()).unwrap();
        assert_eq!(registry.get("NY").unwrap().population(), 19_453_561);
    }
}
