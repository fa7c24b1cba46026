//! Test environment builder for isolated Partwright testing.
//!
//! Provides `TestEnv` - an isolated project directory and config home, plus
//! helpers to run the `partwright` binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a Partwright CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Non-empty stderr lines
    pub fn stderr_lines(&self) -> Vec<&str> {
        self.stderr.lines().filter(|l| !l.trim().is_empty()).collect()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Isolated test environment.
///
/// The config home is isolated too, so a developer's own
/// `~/.config/partwright/config.toml` never leaks into a test.
pub struct TestEnv {
    /// Temporary project directory
    pub project_root: TempDir,
    /// Temporary directory used as HOME and XDG_CONFIG_HOME parent
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run partwright from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run partwright from the project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run partwright from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("PARTWRIGHT_LOG")
            .env_remove("PARTWRIGHT_PROJECT_DIR")
            .env_remove("PARTWRIGHT_PARTS_DIR")
            .env_remove("PARTWRIGHT_STAGE_DIR")
            .env_remove("PARTWRIGHT_PRIME_DIR")
            .env_remove("PARTWRIGHT_VERBOSITY");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute partwright");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Run a command that must succeed
    pub fn run_ok(&self, args: &[&str]) -> TestResult {
        let result = self.run(args);
        assert!(
            result.success,
            "partwright {} failed:\n{}",
            args.join(" "),
            result.combined_output()
        );
        result
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// The recorded completed step of `part`, if it has a state record
    pub fn completed_step(&self, part: &str) -> Option<String> {
        let path = self.project_path(&format!("parts/{}/state/state.toml", part));
        let content = std::fs::read_to_string(path).ok()?;
        let value: toml::Value = toml::from_str(&content).expect("state record is TOML");
        value
            .get("completed")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    project: Option<String>,
    project_config: Option<String>,
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            project: None,
            project_config: None,
            files: Vec::new(),
        }
    }

    /// Set `partwright/project.yaml`
    pub fn with_project(mut self, yaml: &str) -> Self {
        self.project = Some(yaml.to_string());
        self
    }

    /// Set `partwright/config.toml`
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.project_config = Some(toml.to_string());
        self
    }

    /// Add an arbitrary file under the project root
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create project temp dir"),
            home_dir: TempDir::new().expect("Failed to create home temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_partwright")),
        };

        if let Some(project) = &self.project {
            env.write_project_file("partwright/project.yaml", project);
        }
        if let Some(config) = &self.project_config {
            env.write_project_file("partwright/config.toml", config);
        }
        for (relative, content) in &self.files {
            env.write_project_file(relative, content);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
