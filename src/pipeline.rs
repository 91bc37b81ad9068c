//! The full run: population table, API fetch, aggregate, report.
//!
//! Stages run strictly in order. Any error aborts before a report exists.

use tracing::info;

use crate::{
    config::AppConfig, population::load_populations_file, prelude::*, registry::Registry,
    report::Report, tracking::client::TrackingClient,
};

/// Load populations, ingest every daily record, and insert the aggregate.
pub async fn build_registry(config: &AppConfig) -> Result<Registry> {
    let mut registry = load_populations_file(&config.populations.path)?;

    let client = TrackingClient::new(
        Some(config.source.base_url.as_str()),
        config.source.timeout(),
    )?;
    let records = client.states_daily().await?;
    for record in &records {
        registry.ingest(record)?;
    }
    info!(
        records = records.len(),
        latest = ?registry.latest_seen(),
        "Ingested daily records"
    );

    registry.insert_aggregate();
    Ok(registry)
}

pub async fn run(config: &AppConfig) -> Result<Report> {
    let registry = build_registry(config).await?;
    Ok(Report::build(&registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{consts::STATES_DAILY_PATH, Error};
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DAILY: &str = r#"[
        {"state": "A", "dateChecked": "2020-03-20T20:00:00Z",
         "positive": 100, "negative": 900, "pending": 4, "hospitalized": 10, "death": 1},
        {"state": "A", "dateChecked": "2020-03-19T20:00:00Z",
         "positive": 40, "negative": 400, "pending": null, "hospitalized": null, "death": null},
        {"state": "B", "dateChecked": "2020-03-20T21:00:00Z",
         "positive": 50, "negative": 450, "hospitalized": 2, "death": 0}
    ]"#;

    fn populations(rows: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "State,Population\n{rows}").unwrap();
        file.flush().unwrap();
        file
    }

    async fn server_with(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATES_DAILY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn config_for(server: &MockServer, file: &tempfile::NamedTempFile) -> AppConfig {
        let mut config = AppConfig::default();
        config.source.base_url = server.uri();
        config.populations.path = file.path().to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_end_to_end_report() {
        let server = server_with(DAILY).await;
        let file = populations("A,1000000\nB,500000\n");

        let report = run(&config_for(&server, &file)).await.unwrap();

        let codes: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "A", "ΣΣ"]);
        assert_eq!(report.rows[1].snapshots, 2);

        let aggregate = &report.rows[2];
        assert_eq!(aggregate.population, 1_500_000);
        assert_eq!(aggregate.positive_per_million, Some(100));
        assert_eq!(
            report.as_of.map(|ts| ts.to_string()),
            Some("2020-03-20 21:00:00".to_string())
        );

        assert_eq!(report.extrapolations[0].source, "A");
        assert_eq!(report.extrapolations[0].projected, 150);
    }

    #[tokio::test]
    async fn test_unknown_state_aborts() {
        let server = server_with(DAILY).await;
        let file = populations("A,1000000\n");

        let err = run(&config_for(&server, &file)).await.unwrap_err();
        assert!(matches!(err, Error::UnknownState(ref code) if code == "B"));
    }

    #[tokio::test]
    async fn test_missing_population_file_skips_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.source.base_url = server.uri();
        config.populations.path = dir.path().join("populations.csv");

        let err = build_registry(&config).await.unwrap_err();
        assert!(matches!(err, Error::PopulationSource { .. }));
    }

    #[tokio::test]
    async fn test_server_failure_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let file = populations("A,1000000\n");

        let err = run(&config_for(&server, &file)).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
