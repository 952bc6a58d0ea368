//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles
//! on the production sources of the relay crates:
//! - No blocking I/O in async code
//! - No sleep() calls
//!
//! The helpers here scan source text line by line. Everything from a file's
//! first `#[cfg(test)]` onwards is treated as test code and skipped.

use std::path::{Path, PathBuf};

/// Production source roots, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["conductor/core/src", "conductor/console/src"];

/// Workspace root, resolved from this crate's manifest directory
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A rule violation found in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the violation
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// What was found
    pub kind: &'static str,
    /// Offending source line, trimmed
    pub source: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line,
            self.kind,
            self.source
        )
    }
}

/// All `.rs` files below the production roots
#[must_use]
pub fn production_sources() -> Vec<PathBuf> {
    let root = workspace_root();
    let mut files = Vec::new();

    for dir in PRODUCTION_DIRS {
        let path = root.join(dir);
        assert!(path.exists(), "production source root missing: {}", path.display());

        for entry in walkdir::WalkDir::new(&path)
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files
}

/// Production lines of a file: `(line_index, code_without_comment)`
///
/// Stops at the first `#[cfg(test)]`.
#[must_use]
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("#[cfg(test)]") {
            break;
        }
        let code = line.split("//").next().unwrap_or(line);
        if !code.trim().is_empty() {
            out.push((idx, code));
        }
    }
    out
}

/// Whether the line at `current_idx` sits inside an `async fn`
///
/// Scans backwards to the nearest function signature.
#[must_use]
pub fn is_in_async_function(lines: &[&str], current_idx: usize) -> bool {
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if line.contains("async fn ") {
            return true;
        }

        if (line.starts_with("fn ") || line.contains(" fn ")) && !line.contains("async") {
            return false;
        }

        if line.starts_with("mod ") || (line.starts_with("impl ") && line.contains('{')) {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let content = "use tokio::fs;\n// std::fs::read\nfn a() {}\n#[cfg(test)]\nmod tests { use std::fs; }\n";
        let lines = production_lines(content);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (0, "use tokio::fs;"));
        assert_eq!(lines[1].0, 2);
    }

    #[test]
    fn test_async_function_detection() {
        let code = vec![
            "async fn bad_function() {",
            "    let contents = std::fs::read_to_string(\"file.txt\")?;",
            "}",
        ];
        assert!(is_in_async_function(&code, 1));

        let code = vec![
            "fn main() {",
            "    let contents = std::fs::read_to_string(\"config.toml\")?;",
            "}",
        ];
        assert!(!is_in_async_function(&code, 1));
    }

    #[test]
    fn test_sources_are_found() {
        let files = production_sources();
        assert!(files.iter().any(|p| p.ends_with("conductor/core/src/lib.rs")));
        assert!(files.iter().any(|p| p.ends_with("conductor/console/src/main.rs")));
    }
}
