//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod render;
pub mod utils;

// Re-export main command functions
pub use models::{InspectArgs, RenderArgs};
pub use render::{execute_render, resolve_options, validate_args};
pub use utils::{display_version, inspect_events};
