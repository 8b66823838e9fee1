//! Host abstraction layer for separating editor IO from the core logic.
//!
//! The [`Host`] trait covers the two effects quill asks of its embedding
//! editor: opening a file in a view and showing a user-visible error.
//! Commands accept `&mut dyn Host` so the same code drives the real CLI
//! host and the capturing test host.

mod cli;

pub use cli::CliHost;
pub use test::TestHost;

use std::path::PathBuf;

use serde::Serialize;

use crate::config::open;

/// A request to open a file in the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenRequest {
    /// Path of the file to open, already variable-expanded.
    pub path: PathBuf,
    /// Syntax identifier to assign to the opened view, if any.
    pub syntax: Option<String>,
    /// Open as a transient preview view instead of a regular one.
    pub transient: bool,
}

impl OpenRequest {
    /// Create a request with the default (non-transient) open behavior.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            syntax: None,
            transient: open::TRANSIENT,
        }
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }
}

/// Trait for the effects a host editor performs on quill's behalf.
pub trait Host {
    /// Open a file in the host.
    fn open_file(&mut self, request: OpenRequest);

    /// Show a user-visible error message.
    fn error_message(&mut self, msg: &str);
}
