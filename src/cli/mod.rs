//! Command-line layer for Herbarium.
//!
//! - **dispatch**: ADD, REM and PRINT against a collection
//! - **session**: the line loop around the dispatcher (EXIT, HELP, READ)

pub mod dispatch;
pub mod session;

pub use dispatch::{CommandOutput, DispatchOptions, Dispatcher};
pub use session::{Flow, Session, SessionSummary, BUILTIN_HELP};
