//! CLI host implementation.
//!
//! Stands in for an editor when quill runs as a command-line tool: an
//! open request prints the resolved path on stdout for the invoking
//! wrapper to act on, and error messages go to stderr in git-like form.

use super::{Host, OpenRequest};
use crate::{log_debug, log_error};

/// Host implementation that writes to stdout/stderr.
#[derive(Debug, Default)]
pub struct CliHost;

impl CliHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for CliHost {
    fn open_file(&mut self, request: OpenRequest) {
        if let Some(syntax) = &request.syntax {
            log_debug!("assigning syntax {} to {}", syntax, request.path.display());
        }
        if request.transient {
            log_debug!("opening {} as transient view", request.path.display());
        }
        println!("{}", request.path.display());
    }

    fn error_message(&mut self, msg: &str) {
        log_error!("{}", msg);
    }
}
