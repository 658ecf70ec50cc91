//! Style enforcement
//!
//! Scans the `src` trees of the Kundo crates for patterns clippy does not
//! catch. Code after the first `#[cfg(test)]` marker of a file is exempt, and
//! so is compiling a literal regex.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Violation {
    location: String,
    rule: &'static str,
    line: String,
}

const BANNED_FN_PREFIXES: [&str; 3] = ["get_", "set_", "handle_"];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".."))
}

fn rust_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            rust_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

fn production_sources() -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(entries) = fs::read_dir(workspace_root()) else {
        return files;
    };
    for crate_dir in entries.flatten().map(|entry| entry.path()) {
        let is_kundo_crate = crate_dir
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("kundo-"));
        if is_kundo_crate {
            rust_files(&crate_dir.join("src"), &mut files);
        }
    }
    files
}

/// Checks the production part of one file.
fn check_source(location: &str, content: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }

        let mut report = |rule| {
            violations.push(Violation {
                location: format!("{location}:{}", index + 1),
                rule,
                line: trimmed.to_string(),
            })
        };

        if trimmed.contains("allow(dead_code)") {
            report("dead code must be removed, not allowed");
        }
        // A literal pattern either compiles on first use or never does.
        let compiles_literal_pattern = trimmed.contains("Regex::new(r");
        if (trimmed.contains(".unwrap()") || trimmed.contains(".expect("))
            && !compiles_literal_pattern
        {
            report("propagate errors instead of unwrap/expect");
        }
        if BANNED_FN_PREFIXES
            .iter()
            .any(|prefix| trimmed.contains(&format!("fn {prefix}")))
        {
            report("name functions after what they do (no get_/set_/handle_)");
        }
    }

    violations
}

#[test]
fn test_checker_flags_production_code_only() {
    let source = r#"
pub fn get_title() -> String { value.unwrap() }
#[allow(dead_code)]
fn title() {}
// fn handle_comment() mentions are fine
#[cfg(test)]
mod tests {
    fn set_up() { thing.unwrap(); }
}
"#;
    let violations = check_source("example.rs", source);

    let rules: Vec<&str> = violations.iter().map(|v| v.rule).collect();
    assert_eq!(violations.len(), 3, "{violations:#?}");
    assert!(rules[0].contains("unwrap"));
    assert!(rules[1].contains("get_"));
    assert!(rules[2].contains("dead code"));
    assert_eq!(violations[0].location, "example.rs:2");
}

#[test]
fn test_literal_patterns_may_expect() {
    let source = r#"
static PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid"));
let pattern = Regex::new(&user_input).expect("valid");
"#;
    let violations = check_source("example.rs", source);

    assert_eq!(violations.len(), 1, "{violations:#?}");
    assert_eq!(violations[0].location, "example.rs:3");
}

#[test]
fn test_workspace_follows_style() {
    let files = production_sources();
    assert!(!files.is_empty(), "no Kundo sources found");

    let violations: Vec<Violation> = files
        .iter()
        .filter_map(|path| {
            let content = fs::read_to_string(path).ok()?;
            Some(check_source(&path.display().to_string(), &content))
        })
        .flatten()
        .collect();

    for violation in &violations {
        println!("{}: {}\n  {}", violation.location, violation.rule, violation.line);
    }
    assert!(
        violations.is_empty(),
        "{} style violation(s) in {} file(s)",
        violations.len(),
        files.len()
    );
}
