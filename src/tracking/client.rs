use std::time::Duration;

use tracing::info;

use crate::{
    consts::{DEFAULT_API_URL, STATES_DAILY_PATH},
    prelude::*,
    req::HttpClient,
    tracking::response_structs::DailyRecord,
    Error,
};

/// Read-only client for the COVID Tracking Project REST API.
#[derive(Debug)]
pub struct TrackingClient {
    http_client: HttpClient,
}

impl TrackingClient {
    /// Client for `base_url`, or the public API when `None`.
    pub fn new(base_url: Option<&str>, timeout: Option<Duration>) -> Result<TrackingClient> {
        let base_url = base_url.unwrap_or(DEFAULT_API_URL);
        Ok(TrackingClient {
            http_client: HttpClient::new(base_url, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.http_client.base_url
    }

    /// Full daily history for every state.
    pub async fn states_daily(&self) -> Result<Vec<DailyRecord>> {
        let body = self.http_client.get(STATES_DAILY_PATH).await?;
        let records: Vec<DailyRecord> =
            serde_json::from_str(&body).map_err(|e| Error::json_parse(e.to_string()))?;
        info!(records = records.len(), "Fetched daily state records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_states_daily_parses_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATES_DAILY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"state": "WA", "dateChecked": "2020-03-20T20:00:00Z",
                     "positive": 1376, "negative": 19336, "pending": null,
                     "hospitalized": null, "death": 74},
                    {"state": "NY", "dateChecked": "2020-03-20T20:00:00Z",
                     "positive": 7102, "negative": 25325}
                ]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = TrackingClient::new(Some(server.uri().as_str()), None).unwrap();
        let records = client.states_daily().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "WA");
        assert_eq!(records[0].death, Some(74));
        assert_eq!(records[1].death, None);
    }

    #[tokio::test]
    async fn test_server_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATES_DAILY_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let client = TrackingClient::new(Some(server.uri().as_str()), None).unwrap();
        let err = client.states_daily().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(matches!(
            err,
            Error::Http {
                kind: crate::HttpErrorKind::Server { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_not_found_is_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = TrackingClient::new(Some(server.uri().as_str()), None).unwrap();
        let err = client.states_daily().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Http {
                status: 404,
                kind: crate::HttpErrorKind::Client { .. },
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATES_DAILY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = TrackingClient::new(Some(server.uri().as_str()), None).unwrap();
        let err = client.states_daily().await.unwrap_err();
        assert!(matches!(err, Error::JsonParse(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TrackingClient::new(Some("http://localhost:8080/"), None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
