use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

use crate::{prelude::*, Error};

#[derive(Debug)]
pub(crate) struct HttpClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

async fn parse_response(response: Response) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::GenericRequest(e.to_string()))?;

    if status.is_success() {
        return Ok(text);
    }
    let status_code = status.as_u16();
    if status.is_client_error() {
        return Err(Error::client_error(status_code, text));
    }
    Err(Error::server_error(status_code, text))
}

impl HttpClient {
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a GET request and return the body of a 2xx response.
    ///
    /// Any other status is an error; there is no retry.
    pub(crate) async fn get(&self, url_path: &str) -> Result<String> {
        let full_url = format!("{}{url_path}", self.base_url);
        debug!(url = %full_url, "GET");

        let response = self
            .client
            .get(&full_url)
            .send()
            .await
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        parse_response(response).await
    }
}
