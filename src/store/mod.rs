//! Measurement Store collaborator
//!
//! Read-only access to the remote measurements collection.
//! `HttpStore` talks to the real service, `FakeStore` serves fixtures.

pub mod fake;
pub mod http;
pub mod types;

pub use fake::FakeStore;
pub use http::HttpStore;
pub use types::{FetchError, UNKNOWN_ERROR};

use crate::query::filter::QueryDescriptor;
use crate::query::measurement::Measurement;

/// Read interface of the Measurement Store
///
/// One call = one outbound request. Implementations never retry.
pub trait MeasurementStore: Send + Sync {
    /// Fetch the measurements matching `descriptor`, in store order
    fn fetch(&self, descriptor: &QueryDescriptor) -> Result<Vec<Measurement>, FetchError>;
}

/// Concrete store enum
///
/// Lets the UI hold a single store type for both real and fixture backends.
#[derive(Debug)]
pub enum Store {
    Http(HttpStore),
    Fake(FakeStore),
}

impl MeasurementStore for Store {
    fn fetch(&self, descriptor: &QueryDescriptor) -> Result<Vec<Measurement>, FetchError> {
        match self {
            Store::Http(s) => s.fetch(descriptor),
            Store::Fake(s) => s.fetch(descriptor),
        }
    }
}
