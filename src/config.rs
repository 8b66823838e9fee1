/// Configuration constants for quill
///
/// This module centralizes the fixed identifiers and defaults shared by the
/// library components and the command layer, so no magic strings leak into
/// the call sites.
/// Syntax identifiers used for applicability checks
pub mod syntax {
    /// Substring a document's syntax identifier must contain for the
    /// config completion provider to engage.
    pub const GIT_CONFIG: &str = "Git Config";
}

/// Gitfile redirect handling
pub mod gitfile {
    /// Name of the repository marker entry at a worktree root.
    pub const NAME: &str = ".git";

    /// Literal prefix of a `.git` redirect file's content, as written by
    /// `git worktree add` and `git submodule`.
    pub const PREFIX: &str = "gitdir: ";
}

/// Repository variable names exposed to open-file templates
pub mod variables {
    /// Worktree root of the file's own repository.
    pub const WORK_TREE: &str = "GIT_WORK_TREE";

    /// Git directory, after resolving any gitfile redirect.
    pub const GIT_DIR: &str = "GIT_DIR";

    /// Shared git directory (differs from GIT_DIR in linked worktrees
    /// and submodules).
    pub const COMMON_DIR: &str = "GIT_COMMON_DIR";

    /// Worktree owning the common directory.
    pub const SUPER_WORK_TREE: &str = "GIT_SUPER_WORK_TREE";
}

/// Defaults for the open-file surface
pub mod open {
    /// Documents open as normal (non-transient) views unless the caller
    /// opts in to transient opening.
    pub const TRANSIENT: bool = false;
}
