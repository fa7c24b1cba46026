//! Reusable project definitions for CLI tests.

/// Three parts, none depending on another.
pub const PROJECT_INDEPENDENT: &str = r#"name: clean-test
version: "1.0"
summary: independent parts
parts:
  clean1:
    plugin: nil
  clean2:
    plugin: nil
  clean3:
    plugin: nil
"#;

/// main <- dependent <- nested-dependent
pub const PROJECT_CHAIN: &str = r#"name: clean-dependents
version: "1.0"
summary: a dependency chain
parts:
  main:
    plugin: nil
  dependent:
    plugin: nil
    after: [main]
  nested-dependent:
    plugin: nil
    after: [dependent]
"#;

/// Two dump parts that both ship `share/common.txt`.
pub const PROJECT_SHARED_FILES: &str = r#"name: shared
parts:
  first:
    plugin: dump
    source: first
  second:
    plugin: dump
    source: second
"#;

/// Two parts that depend on each other.
pub const PROJECT_CYCLE: &str = r#"name: cycle
parts:
  a:
    plugin: nil
    after: [b]
  b:
    plugin: nil
    after: [a]
"#;

pub const COMMON_CONTENT: &str = "shared by both parts\n";
