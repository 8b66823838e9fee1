//! Command implementations for the quill CLI.

pub mod complete;
pub mod completions;
pub mod open_file;
pub mod rebase;
pub mod rev_parse;
