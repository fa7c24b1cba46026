//! Custom assertion macros for CLI tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that a path exists relative to the project root.
///
/// # Example
/// ```ignore
/// assert_exists!(env, "parts/main");
/// ```
#[macro_export]
macro_rules! assert_exists {
    ($env:expr, $path:expr) => {
        assert!(
            $env.project_path($path).exists(),
            "Expected '{}' to exist, but it doesn't.\n\
             Files found:\n  {}",
            $path,
            $crate::common::list_all_files($env.project_root.path()).join("\n  ")
        );
    };
}

/// Assert that a path does NOT exist relative to the project root.
#[macro_export]
macro_rules! assert_not_exists {
    ($env:expr, $path:expr) => {
        assert!(
            !$env.project_path($path).exists(),
            "Expected '{}' to NOT exist, but it does.\n\
             Files found:\n  {}",
            $path,
            $crate::common::list_all_files($env.project_root.path()).join("\n  ")
        );
    };
}

/// Assert that stderr is exactly one line with the expected text.
#[macro_export]
macro_rules! assert_stderr_line {
    ($result:expr, $expected:expr) => {
        assert_eq!(
            $result.stderr_lines(),
            vec![$expected],
            "Unexpected stderr.\nstdout:\n{}",
            $result.stdout
        );
    };
}
