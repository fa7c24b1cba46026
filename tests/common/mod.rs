//! Common test utilities for Partwright CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the binary
//! - Assertion macros: `assert_exists!`, `assert_not_exists!`, `assert_stderr_line!`
//! - Fixtures: Reusable project definitions

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
