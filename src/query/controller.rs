//! Search state machine
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ──submit──▶ Loading ...
//!                     │
//!                     └──err──▶ Error ──submit──▶ Loading ...
//! ```
//!
//! Every submission is tagged with a sequence number. A completion is only
//! applied if it belongs to the latest submission; older ones are dropped on
//! arrival, so a slow first request can never overwrite a newer answer.

use crate::query::filter::QueryDescriptor;
use crate::query::measurement::Measurement;
use crate::query::state::{Phase, QueryState};
use crate::store::{FetchError, MeasurementStore};

/// A request the caller must issue exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    seq: u64,
    descriptor: QueryDescriptor,
}

impl SearchRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Run the request against `store` (one outbound call)
    pub fn execute<S: MeasurementStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Vec<Measurement>, FetchError> {
        store.fetch(&self.descriptor)
    }
}

/// What `QueryController::complete` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Outcome applied; state moved to this phase
    Applied(Phase),
    /// Outcome belonged to a superseded or unknown request and was dropped
    Stale { seq: u64 },
}

/// Owner of the search lifecycle state
#[derive(Debug, Default)]
pub struct QueryController {
    state: QueryState,
    /// Last sequence number handed out (0 = none yet)
    last_issued: u64,
    /// Sequence number still waiting for its outcome
    in_flight: Option<u64>,
}

impl QueryController {
    /// Create a controller in `Idle` with no results
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state (read-only)
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Owned copy of the current state for renderers
    pub fn snapshot(&self) -> QueryState {
        self.state.clone()
    }

    /// Sequence number of the request whose outcome is still awaited
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Start a new search
    ///
    /// Allowed from any phase, including `Loading`; the previous outstanding
    /// request becomes stale.
    pub fn submit(&mut self, descriptor: QueryDescriptor) -> SearchRequest {
        self.last_issued += 1;
        let seq = self.last_issued;

        if let Some(previous) = self.in_flight.replace(seq) {
            tracing::debug!(previous, seq, "superseding outstanding search");
        }
        self.state.begin_loading();

        tracing::info!(
            seq,
            patient_id = descriptor.patient_identifier().unwrap_or("*"),
            has_from = descriptor.from().is_some(),
            has_to = descriptor.to().is_some(),
            "search submitted"
        );

        SearchRequest { seq, descriptor }
    }

    /// Apply the outcome of request `seq`
    pub fn complete(
        &mut self,
        seq: u64,
        outcome: Result<Vec<Measurement>, FetchError>,
    ) -> Completion {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, latest = self.last_issued, "dropping stale search result");
            return Completion::Stale { seq };
        }
        self.in_flight = None;

        match outcome {
            Ok(results) => {
                tracing::info!(seq, count = results.len(), "search succeeded");
                self.state.apply_success(results);
            }
            Err(error) => {
                tracing::warn!(seq, %error, "search failed");
                self.state.apply_failure(error);
            }
        }
        Completion::Applied(self.state.phase())
    }

    /// Submit, fetch synchronously and apply the outcome
    pub fn search<S: MeasurementStore + ?Sized>(
        &mut self,
        store: &S,
        descriptor: QueryDescriptor,
    ) -> &QueryState {
        let request = self.submit(descriptor);
        let outcome = request.execute(store);
        self.complete(request.seq(), outcome);
        &self.state
    }
}
