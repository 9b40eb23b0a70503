//! One-shot search mode
//!
//! Runs the same filter builder and controller as the TUI, synchronously,
//! and prints either a text table or the raw JSON array.

use std::io::Write;

use chrono::Local;

use crate::cli::args::SearchArgs;
use crate::cli::{Result, EXIT_QUERY_FAILED, EXIT_SUCCESS};
use crate::config::Config;
use crate::query::controller::QueryController;
use crate::query::state::Phase;
use crate::query::table::render_text_table;
use crate::store::{HttpStore, MeasurementStore, UNKNOWN_ERROR};

/// Run a search against the configured store and print to stdout/stderr
pub fn run_search(config: &Config, args: &SearchArgs) -> Result<i32> {
    let store = HttpStore::from_config(config)?;
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_search_with(&store, args, &mut stdout.lock(), &mut stderr.lock())
}

/// Run a search against `store`, writing results to `out` and errors to `err`
///
/// Returns the process exit code.
pub fn run_search_with<S, W, E>(store: &S, args: &SearchArgs, out: &mut W, err: &mut E) -> Result<i32>
where
    S: MeasurementStore + ?Sized,
    W: Write,
    E: Write,
{
    let descriptor = args.filter_input().to_descriptor();
    let mut controller = QueryController::new();
    let state = controller.search(store, descriptor);

    match state.phase() {
        Phase::Success => {
            if args.json {
                serde_json::to_writer_pretty(&mut *out, state.results())?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render_text_table(state.results(), &Local))?;
            }
            Ok(EXIT_SUCCESS)
        }
        _ => {
            let description = state
                .error_description()
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            writeln!(err, "Error: {}", description)?;
            Ok(EXIT_QUERY_FAILED)
        }
    }
}
