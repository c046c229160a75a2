use crate::sdk::maps::error::MapsError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) struct Fetched<T> {
    pub status: StatusCode,
    pub body: T,
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, MapsError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MapsError::Configuration(format!("failed to build HTTP client: {}", e)))
}

/// One GET against `url`, body parsed as `T` whatever the HTTP status.
///
/// Errors are stripped of their URL: the query string carries the credential.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &str,
    url: &str,
    query: &[(&str, String)],
) -> Result<Fetched<T>, MapsError> {
    log::debug!("[PROVIDER] {} GET {}", provider, url);

    let response = match client.get(url).query(query).send().await {
        Ok(resp) => resp,
        Err(e) => {
            let e = e.without_url();
            log::error!(
                "Failed to send request to {}. URL: {}\nError: {}",
                provider,
                url,
                e
            );
            return Err(e.into());
        }
    };

    let status = response.status();
    let text = response.text().await.map_err(|e| e.without_url())?;

    let body = serde_json::from_str(&text).map_err(|e| {
        log::error!(
            "Failed to parse {} response. URL: {} Status: {}\nError: {}. Body: {}",
            provider,
            url,
            status,
            e,
            text
        );
        e
    })?;

    Ok(Fetched { status, body })
}
