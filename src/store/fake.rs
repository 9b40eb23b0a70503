//! Fake store for testing
//!
//! Serves fixture bodies instead of real HTTP calls and records every
//! descriptor it is asked for.

use std::sync::Mutex;
use std::time::Duration;

use crate::query::filter::QueryDescriptor;
use crate::query::measurement::{decode_measurements, Measurement};
use crate::store::types::FetchError;
use crate::store::MeasurementStore;

/// Fixture-driven Measurement Store
#[derive(Debug)]
pub struct FakeStore {
    /// Status code to answer with
    pub status: u16,
    /// Response body to return on success
    pub body: String,
    /// Network failure to report instead of answering (if set)
    pub network_error: Option<String>,
    /// Artificial latency before answering
    pub delay: Option<Duration>,
    received: Mutex<Vec<QueryDescriptor>>,
}

impl FakeStore {
    /// Answer 200 with the given raw body
    pub fn new(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            network_error: None,
            delay: None,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Answer 200 with the given records serialized as JSON
    pub fn with_measurements(measurements: &[Measurement]) -> Self {
        let body = serde_json::to_string(measurements).unwrap_or_else(|_| "[]".to_string());
        Self::new(&body)
    }

    /// Answer with a non-success status and an empty body
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::new("")
        }
    }

    /// Fail without a response
    pub fn with_network_error(msg: &str) -> Self {
        Self {
            network_error: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    /// Delay every answer by `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Descriptors received so far, in call order
    pub fn received(&self) -> Vec<QueryDescriptor> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of fetches issued against this store
    pub fn request_count(&self) -> usize {
        self.received.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl MeasurementStore for FakeStore {
    fn fetch(&self, descriptor: &QueryDescriptor) -> Result<Vec<Measurement>, FetchError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(descriptor.clone());
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if let Some(ref msg) = self.network_error {
            return Err(FetchError::Network(msg.clone()));
        }
        if !(200..300).contains(&self.status) {
            return Err(FetchError::Http {
                status: self.status,
            });
        }
        decode_measurements(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_store_basic() {
        let store = FakeStore::new("[]");
        let result = store.fetch(&QueryDescriptor::default());
        assert_eq!(result.unwrap(), Vec::new());
        assert_eq!(store.request_count(), 1);
    }

    #[test]
    fn test_fake_store_status() {
        let store = FakeStore::with_status(503);
        let result = store.fetch(&QueryDescriptor::default());
        assert_eq!(result, Err(FetchError::Http { status: 503 }));
    }

    #[test]
    fn test_fake_store_network_error() {
        let store = FakeStore::with_network_error("connection refused");
        let result = store.fetch(&QueryDescriptor::default());
        assert_eq!(
            result,
            Err(FetchError::Network("connection refused".to_string()))
        );
    }

    #[test]
    fn test_fake_store_bad_body() {
        let store = FakeStore::new("not json");
        assert!(matches!(
            store.fetch(&QueryDescriptor::default()),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_fake_store_records_descriptors() {
        use crate::query::filter::FilterInput;

        let store = FakeStore::new("[]");
        let descriptor = FilterInput::new("patient-1", None, None).to_descriptor();
        let _ = store.fetch(&descriptor);
        let _ = store.fetch(&QueryDescriptor::default());

        let received = store.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].patient_identifier(), Some("patient-1"));
        assert!(received[1].is_unfiltered());
    }
}
