//! Dashboard terminal UI
//!
//! The UI never blocks on the network:
//! - Enter submits the form and spawns a search worker
//! - The main loop drains worker outcomes each tick
//! - Rendering reads the current `QueryState` snapshot only

pub mod handlers;
pub mod input;
pub mod state;
pub mod view;

// Re-exports
pub use handlers::{apply_action, handle_key_event};
pub use input::{key_action, InputAction};
pub use state::{App, AppState, Field};
pub use view::render;

/// UI result type
pub type Result<T> = std::result::Result<T, Error>;

/// UI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{field}: expected YYYY-MM-DDTHH:MM, got {input:?}")]
    InvalidTime { field: &'static str, input: String },
}
