//! Background search worker
//!
//! Each submitted search runs on its own short-lived thread that does ONLY
//! the store I/O and reports one `SearchEvent` over an mpsc channel. The UI
//! loop drains the channel without blocking and hands outcomes to the
//! controller, which decides whether they are still current.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::query::controller::{Completion, QueryController, SearchRequest};
use crate::query::measurement::Measurement;
use crate::store::{FetchError, MeasurementStore};

/// Channel sender for search events
pub type SearchSender = mpsc::Sender<SearchEvent>;
/// Channel receiver for search events
pub type SearchReceiver = mpsc::Receiver<SearchEvent>;

/// Event sent from a search worker to the UI loop
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// The store answered (or failed) for request `seq`
    Completed {
        seq: u64,
        outcome: Result<Vec<Measurement>, FetchError>,
    },
}

impl SearchEvent {
    pub fn seq(&self) -> u64 {
        match self {
            SearchEvent::Completed { seq, .. } => *seq,
        }
    }
}

/// Handle of a running search worker
#[derive(Debug)]
pub struct SearchWorkerHandle {
    handle: Option<JoinHandle<()>>,
    seq: u64,
}

impl SearchWorkerHandle {
    /// Sequence number of the request this worker is running
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Check if the worker is still waiting on the store
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Wait for the worker to exit
    pub fn join(mut self) -> thread::Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}

/// Run `request` against `store` on a background thread
///
/// The worker sends exactly one `SearchEvent::Completed`. If the receiver is
/// gone (session ended) the outcome is discarded.
pub fn spawn_search<S>(store: Arc<S>, request: SearchRequest, tx: SearchSender) -> SearchWorkerHandle
where
    S: MeasurementStore + ?Sized + 'static,
{
    let seq = request.seq();
    let handle = thread::spawn(move || {
        tracing::debug!(seq, "search worker started");
        let outcome = request.execute(store.as_ref());
        if tx.send(SearchEvent::Completed { seq, outcome }).is_err() {
            tracing::debug!(seq, "search receiver dropped, discarding outcome");
        }
    });

    SearchWorkerHandle {
        handle: Some(handle),
        seq,
    }
}

/// Feed every pending event into `controller` without blocking
pub fn drain_completions(controller: &mut QueryController, rx: &SearchReceiver) -> Vec<Completion> {
    let mut completions = Vec::new();
    while let Ok(event) = rx.try_recv() {
        match event {
            SearchEvent::Completed { seq, outcome } => {
                completions.push(controller.complete(seq, outcome));
            }
        }
    }
    completions
}
