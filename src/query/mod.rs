//! Search core
//!
//! - `filter`: raw form input → `QueryDescriptor` → request URL
//! - `controller`: Idle/Loading/Success/Error state machine with tagged requests
//! - `worker`: background thread + event channel for outstanding requests
//! - `table`: time-formatted result rows

pub mod controller;
pub mod filter;
pub mod measurement;
pub mod state;
pub mod table;
pub mod worker;

pub use controller::{Completion, QueryController, SearchRequest};
pub use filter::{parse_local_datetime, FilterInput, QueryDescriptor, MEASUREMENTS_PATH};
pub use measurement::{decode_measurements, Measurement};
pub use state::{Phase, QueryState};
pub use table::{render_text_table, results_heading, ResultRow, COLUMNS, EMPTY_RESULTS_HINT};
pub use worker::{drain_completions, spawn_search, SearchEvent, SearchReceiver, SearchSender};
