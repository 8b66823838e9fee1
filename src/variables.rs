//! Repository variables for open-file templates.
//!
//! Replaces template variables like `$GIT_DIR` or `${GIT_WORK_TREE}` in
//! path templates with the values resolved for the current file, so a
//! command can open `$GIT_DIR/config` or `$GIT_COMMON_DIR/hooks/pre-commit`
//! without knowing the repository layout.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::variables as names;
use crate::revparse::WorktreeLocation;

/// The variables a resolved location exposes, in stable output order.
///
/// - `GIT_COMMON_DIR` — shared git directory
/// - `GIT_DIR` — git directory, after gitfile indirection
/// - `GIT_SUPER_WORK_TREE` — worktree owning the common directory
/// - `GIT_WORK_TREE` — worktree root of the file's own repository
pub fn variables(location: &WorktreeLocation) -> Vec<(&'static str, String)> {
    vec![
        (
            names::COMMON_DIR,
            location.commondir.to_string_lossy().into_owned(),
        ),
        (names::GIT_DIR, location.gitdir.to_string_lossy().into_owned()),
        (
            names::SUPER_WORK_TREE,
            location.super_worktree.to_string_lossy().into_owned(),
        ),
        (
            names::WORK_TREE,
            location.worktree.to_string_lossy().into_owned(),
        ),
    ]
}

/// Substitute `$NAME` and `${NAME}` placeholders in `template` with the
/// values from `location`. Unknown variables are left verbatim, so
/// templates aimed at another expander pass through unharmed.
pub fn expand(template: &str, location: &WorktreeLocation) -> String {
    let values: HashMap<&str, String> = variables(location).into_iter().collect();
    placeholder()
        .replace_all(template, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match values.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))").expect("valid regex")
    })
}
