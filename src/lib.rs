pub mod commands;
pub mod completions;
pub mod config;
pub mod document;
pub mod host;
pub mod logging;
pub mod rebase;
pub mod revparse;
pub mod variables;

/// Crate version as stamped by the build script.
pub const VERSION: &str = env!("QUILL_VERSION");

/// Version string for display, including the dev-build annotation.
pub const VERSION_DISPLAY: &str = env!("QUILL_VERSION_DISPLAY");
