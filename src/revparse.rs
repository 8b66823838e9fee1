//! Worktree discovery without running Git.
//!
//! Mirrors the answers `git rev-parse` would give for `--show-toplevel`,
//! `--git-dir`, `--git-common-dir` and `--show-superproject-working-tree`
//! by walking the filesystem directly: ascend from the queried path until
//! a directory carrying a `.git` entry appears, then follow a possible
//! `gitdir: ` redirect file to the real git directory. Linked worktrees
//! and submodules are recognized by the `.git` segment embedded in their
//! resolved git directory path.
//!
//! Every function here is total: unreadable files, dangling symlinks and
//! paths outside any repository produce `None` or a best-effort fallback,
//! never a panic or an error.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::gitfile;

/// Resolved repository layout around a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeLocation {
    /// Root of the worktree the path belongs to.
    pub worktree: PathBuf,
    /// Git directory, after resolving any gitfile redirect.
    pub gitdir: PathBuf,
    /// Shared git directory. Equals `gitdir` except in linked worktrees
    /// and submodules.
    pub commondir: PathBuf,
    /// Worktree owning `commondir`. Equals `worktree` except in linked
    /// worktrees and submodules.
    pub super_worktree: PathBuf,
}

impl WorktreeLocation {
    /// Resolve the repository enclosing `path`, or `None` when no
    /// ancestor directory carries a `.git` entry.
    ///
    /// The four fields are derived together: a successful resolution
    /// always fills all of them.
    pub fn resolve(path: &Path) -> Option<Self> {
        let worktree = toplevel(path)?;
        let marker = worktree.join(gitfile::NAME);
        let gitdir = read_gitfile(&marker).unwrap_or(marker);
        let (commondir, super_worktree) = match split_common(&gitdir) {
            Some(pair) => pair,
            None => (gitdir.clone(), worktree.clone()),
        };
        Some(Self {
            worktree,
            gitdir,
            commondir,
            super_worktree,
        })
    }
}

/// Find the worktree root enclosing `path`: the nearest ancestor
/// directory containing a `.git` entry (file or directory).
///
/// Only ancestors are tested, never `path` itself, so a file inside a
/// `.git` directory resolves to the repository around it. Returns `None`
/// for an empty path or when the walk reaches the filesystem root
/// without a match.
pub fn toplevel(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    let canonical = canonicalize_or_fallback(path);
    let mut current = canonical.as_path();
    while let Some(parent) = current.parent() {
        if parent.join(gitfile::NAME).exists() {
            return Some(parent.to_path_buf());
        }
        current = parent;
    }
    None
}

/// Canonicalize `path`, resolving symlinks where the filesystem allows
/// it. Paths that cannot be canonicalized (typically because they do not
/// exist yet) degrade to lexical normalization of the absolute path.
pub(crate) fn canonicalize_or_fallback(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(_) => normalize_lexically(&absolute(path)),
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    out
}

/// Read a `.git` redirect file and return its canonicalized target.
///
/// Returns `None` when `marker` is a directory, unreadable, or does not
/// start with the `gitdir: ` prefix; callers fall back to treating the
/// marker itself as the git directory. Relative targets are anchored at
/// the marker's own directory, matching how Git writes them for
/// submodules.
fn read_gitfile(marker: &Path) -> Option<PathBuf> {
    let text = fs::read_to_string(marker).ok()?;
    let target = text.strip_prefix(gitfile::PREFIX)?.trim();
    if target.is_empty() {
        return None;
    }
    let target = Path::new(target);
    let anchored = if target.is_absolute() {
        target.to_path_buf()
    } else {
        marker.parent()?.join(target)
    };
    Some(canonicalize_or_fallback(&anchored))
}

/// Split a git directory nested inside another repository's `.git`
/// directory into (common directory, super worktree).
///
/// The last `.git` segment before the final component marks the
/// boundary: `/repo/.git/worktrees/wt` yields `/repo/.git` and `/repo`.
/// A plain top-level git directory has no such segment and returns
/// `None`.
fn split_common(gitdir: &Path) -> Option<(PathBuf, PathBuf)> {
    let components: Vec<Component> = gitdir.components().collect();
    for idx in (0..components.len().saturating_sub(1)).rev() {
        if let Component::Normal(name) = components[idx] {
            if name == gitfile::NAME {
                let commondir: PathBuf = components[..=idx].iter().collect();
                let super_worktree: PathBuf = components[..idx].iter().collect();
                return Some((commondir, super_worktree));
            }
        }
    }
    None
}
