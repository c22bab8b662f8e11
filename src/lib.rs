pub mod error;
pub mod ingest;
pub mod layout;
pub mod logging;
pub mod model;
pub mod poll;
pub mod reconcile;
pub mod remote;
pub mod tui;
mod tui_shell;
