//! Custom assertion helpers for subvendor integration tests.

use std::path::Path;

use super::git_helpers;

/// Assert that a checkout is on the expected branch.
pub fn assert_on_branch(repo_path: &Path, expected: &str) {
    let actual = git_helpers::current_branch(repo_path);
    assert_eq!(
        actual,
        expected,
        "Expected repo at {} to be on branch '{}', but was on '{}'",
        repo_path.display(),
        expected,
        actual
    );
}

/// Assert that a checkout has a detached HEAD.
pub fn assert_detached(repo_path: &Path) {
    assert_on_branch(repo_path, "HEAD");
}

/// Assert that a file or directory exists at the given path.
pub fn assert_exists(path: &Path) {
    assert!(path.exists(), "Expected {} to exist", path.display());
}

/// Assert that nothing exists at the given path.
pub fn assert_not_exists(path: &Path) {
    assert!(!path.exists(), "Expected {} to NOT exist", path.display());
}

/// Assert that `.gitmodules` in the superproject mentions a path.
pub fn assert_gitmodules_contains(root: &Path, needle: &str) {
    let content = std::fs::read_to_string(root.join(".gitmodules"))
        .unwrap_or_else(|e| panic!("failed to read .gitmodules: {}", e));
    assert!(
        content.contains(needle),
        "Expected .gitmodules to contain '{}', got:\n{}",
        needle,
        content
    );
}
