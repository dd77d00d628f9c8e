//! Typed HTTP client for the site API.
//!
//! Mirrors the dashboard's browser-side calls: fetch, add, update and delete
//! sites through `/api/sites`.

use models::{Site, SiteInput};
use reqwest::{Response, StatusCode};
use thiserror::Error;
use tracing::error;

use crate::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

#[derive(Clone, Debug)]
pub struct SitesClient {
    base_url: String,
    http: reqwest::Client,
}

impl SitesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn sites_url(&self) -> String {
        format!("{}/api/sites", self.base_url)
    }

    fn site_url(&self, id: &str) -> String {
        format!("{}/api/sites/{}", self.base_url, id)
    }

    pub async fn fetch_sites(&self) -> Result<Vec<Site>, ClientError> {
        let resp = self.http.get(self.sites_url()).send().await?;
        decode(check(resp, "fetch sites").await?).await
    }

    pub async fn add_site(&self, input: &SiteInput) -> Result<Site, ClientError> {
        let resp = self.http.post(self.sites_url()).json(input).send().await?;
        decode(check(resp, "add site").await?).await
    }

    pub async fn update_site(&self, id: &str, input: &SiteInput) -> Result<Site, ClientError> {
        let resp = self.http.put(self.site_url(id)).json(input).send().await?;
        decode(check(resp, "update site").await?).await
    }

    pub async fn delete_site(&self, id: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.site_url(id)).send().await?;
        check(resp, "delete site").await?;
        Ok(())
    }
}

async fn check(resp: Response, action: &str) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    error!(%status, %message, "failed to {action}");
    Err(ClientError::Status { status, message })
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
