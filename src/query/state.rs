//! Query lifecycle state
//!
//! Owned by `QueryController`; everything else reads it through `&QueryState`
//! or a cloned snapshot.

use crate::query::measurement::Measurement;
use crate::store::FetchError;

/// Lifecycle phase of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is outstanding
    Loading,
    /// Last applied request returned results (possibly none)
    Success,
    /// Last applied request failed
    Error,
}

/// Snapshot of the search lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    phase: Phase,
    results: Vec<Measurement>,
    error: Option<FetchError>,
}

impl QueryState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Results of the last successful search
    ///
    /// Kept through later failures, so stale rows stay visible under the
    /// error message.
    pub fn results(&self) -> &[Measurement] {
        &self.results
    }

    /// Failure kind, only in `Phase::Error`
    pub fn error(&self) -> Option<&FetchError> {
        match self.phase {
            Phase::Error => self.error.as_ref(),
            _ => None,
        }
    }

    /// Operator-facing error text, only in `Phase::Error`
    pub fn error_description(&self) -> Option<String> {
        self.error().map(FetchError::describe)
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    pub(crate) fn apply_success(&mut self, results: Vec<Measurement>) {
        self.results = results;
        self.error = None;
        self.phase = Phase::Success;
    }

    pub(crate) fn apply_failure(&mut self, error: FetchError) {
        self.error = Some(error);
        self.phase = Phase::Error;
    }
}
