//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Production code in the relay crates MUST NOT use blocking I/O.
//! **Required**: Use `tokio::fs`, `tokio::io`, `tokio::net`, not `std::fs`, `std::net`

use std::fs;

use architectural_enforcement::{
    is_in_async_function, production_lines, production_sources, Violation,
};

#[test]
fn test_no_blocking_io_in_production_code() {
    let violations = find_blocking_io_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n❌ FORBIDDEN blocking I/O:");
        eprintln!("  - std::fs::read(), std::fs::write(), std::fs::File");
        eprintln!("  - std::net::TcpStream, std::net::TcpListener");
        eprintln!("  - reqwest::blocking::*");
        eprintln!("  - std::io::stdin() / std::io::stdout() inside async fn");
        eprintln!("\n✅ REQUIRED async I/O:");
        eprintln!("  - tokio::fs::read_to_string().await, tokio::fs::OpenOptions");
        eprintln!("  - tokio::io::stdin() with AsyncBufReadExt::lines()");
        eprintln!("  - reqwest::Client (async)");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

fn find_blocking_io_violations() -> Vec<Violation> {
    let mut violations = Vec::new();

    for path in production_sources() {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let all_lines: Vec<&str> = content.lines().collect();

        for (idx, code) in production_lines(&content) {
            let kind = if code.contains("std::fs::") || code.contains("use std::fs") {
                Some("Blocking file I/O")
            } else if code.contains("std::net::") || code.contains("use std::net") {
                Some("Blocking network I/O")
            } else if code.contains("reqwest::blocking") {
                Some("Blocking HTTP client")
            } else if (code.contains("std::io::stdin()") || code.contains("std::io::stdout()"))
                && is_in_async_function(&all_lines, idx)
            {
                Some("Blocking stdin/stdout in async")
            } else {
                None
            };

            if let Some(kind) = kind {
                violations.push(Violation {
                    path: path.clone(),
                    line: idx + 1,
                    kind,
                    source: all_lines[idx].trim().to_string(),
                });
            }
        }
    }

    violations
}
