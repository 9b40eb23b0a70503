//! Measurements Dashboard: search stored blood pressure and heart rate readings
//!
//! Turns form input (patient identifier, local time window) into a query on
//! the Measurement Store and tracks the search lifecycle so that only the most
//! recent submission is ever displayed.

pub mod cli;
pub mod config;
pub mod logging;
pub mod query;
pub mod store;
pub mod ui;

// Re-export the search core
pub use query::{
    Completion, FilterInput, Measurement, Phase, QueryController, QueryDescriptor, QueryState,
    SearchRequest,
};

// Re-export store access
pub use store::{FakeStore, FetchError, HttpStore, MeasurementStore, Store};

pub use config::{Config, ConfigError};
