//! Real Measurement Store transport using reqwest
//!
//! Blocking client; callers run it on a worker thread so the UI loop never
//! waits on the network.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;

use crate::config::Config;
use crate::query::filter::QueryDescriptor;
use crate::query::measurement::{decode_measurements, Measurement};
use crate::store::types::FetchError;
use crate::store::MeasurementStore;

/// HTTP Measurement Store client
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(config.base_url().clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl MeasurementStore for HttpStore {
    fn fetch(&self, descriptor: &QueryDescriptor) -> Result<Vec<Measurement>, FetchError> {
        let url = descriptor.request_url(&self.base_url);
        tracing::debug!(%url, "GET measurements");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "measurements response");
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode_measurements(&body)
    }
}
