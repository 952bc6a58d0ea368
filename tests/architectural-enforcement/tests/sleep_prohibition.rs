//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the relay crates MUST NOT call sleep methods.
//! A turn waits on the remote agent's response, never on a timer.

use std::fs;

use architectural_enforcement::{production_lines, production_sources, Violation};

const SLEEP_PATTERNS: &[&str] = &[
    "thread::sleep",
    "tokio::time::sleep",
    "time::sleep(",
    "sleep_until(",
];

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for path in production_sources() {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let all_lines: Vec<&str> = content.lines().collect();

        for (idx, code) in production_lines(&content) {
            if SLEEP_PATTERNS.iter().any(|p| code.contains(p)) {
                violations.push(Violation {
                    path: path.clone(),
                    line: idx + 1,
                    kind: "Sleep call",
                    source: all_lines[idx].trim().to_string(),
                });
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ Wait on I/O instead: channels, streams, HTTP responses.");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}
