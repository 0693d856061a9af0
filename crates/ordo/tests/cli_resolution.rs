//! Integration tests for resolving configuration through the CLI
//!
//! Every test runs in its own temporary directory with HOME pointed at a
//! second temporary directory, so no real user configuration is read.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

struct Sandbox {
    home: TempDir,
    project: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
            project: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, relative: &str, content: &str) -> std::path::PathBuf {
        let path = self.project.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn write_user_config(&self, content: &str) {
        let dir = self.home.path().join(".ordo");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), content).unwrap();
    }

    fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_ordo"));
        command
            .current_dir(self.project.path())
            .env("HOME", self.home.path())
            .env_remove("RUST_LOG");
        command
    }

    /// Run with the environment source disabled.
    fn run(&self, args: &[&str]) -> Output {
        self.command()
            .arg("--no-env")
            .args(args)
            .output()
            .expect("Failed to execute 'ordo'")
    }
}

fn join<'a>(head: &[&'a str], tail: &[&'a str]) -> Vec<&'a str> {
    head.iter().chain(tail).copied().collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "ordo failed with exit code {:?}. stderr: {}",
        output.status.code(),
        stderr(output)
    );
}

#[test]
fn test_get_reads_set_value() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["get", "greeting", "--set", "greeting=hello"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "hello");
}

#[test]
fn test_get_missing_property_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["get", "absent"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Property 'absent' is not defined"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_file_with_profile_overlay() {
    let sandbox = Sandbox::new();
    let file = sandbox.write(
        "app.toml",
        "[server]\nport = 8080\n\n[\"%prod\".server]\nport = 443\n",
    );
    let file = file.to_str().unwrap();

    let output = sandbox.run(&["get", "server.port", "--file", file]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "8080");

    let output = sandbox.run(&["get", "server.port", "--file", file, "--profile", "prod"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "443");
}

#[test]
fn test_profile_from_configuration_property() {
    let sandbox = Sandbox::new();
    sandbox.write(".ordo/config.toml", "ordo.profile = \"dev\"\nport = 1\n\"%dev.port\" = 2\n");
    let output = sandbox.run(&["get", "port"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "2");
}

#[test]
fn test_project_file_outranks_user_file_and_set_outranks_both() {
    let sandbox = Sandbox::new();
    sandbox.write_user_config("name = \"user\"\nuser.only = \"u\"\n");
    sandbox.write(".ordo/config.toml", "name = \"project\"\n");

    let output = sandbox.run(&["get", "name"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "project");

    let output = sandbox.run(&["get", "user.only"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "u");

    let output = sandbox.run(&["get", "name", "--set", "name=cli"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "cli");
}

#[test]
fn test_malformed_project_file_fails() {
    let sandbox = Sandbox::new();
    sandbox.write(".ordo/config.toml", "invalid toml [[[");
    let output = sandbox.run(&["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to build configuration"));
}

#[test]
fn test_expression_expansion_and_raw() {
    let sandbox = Sandbox::new();
    let args = ["--set", "host=example.com", "--set", "url=https://${host}/${path:index}"];

    let output = sandbox.run(&join(&["get", "url"], &args));
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "https://example.com/index");

    let output = sandbox.run(&join(&["get", "url", "--raw"], &args));
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "https://${host}/${path:index}");
}

#[test]
fn test_base64_secret_handler() {
    let sandbox = Sandbox::new();
    let args = ["--set", "db.password=${base64::aHVudGVyMg==}"];

    let output = sandbox.run(&join(&["get", "db.password"], &args));
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "hunter2");

    let output = sandbox.run(&join(&["get", "db.password", "--raw"], &args));
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "${base64::aHVudGVyMg==}");

    let output = sandbox.run(&["get", "db.password", "--set", "db.password=${vault::abc}"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No secret handler named 'vault'"));
}

#[test]
fn test_missing_reference_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["get", "url", "--set", "url=${host}"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Property 'host' referenced by 'url' is not defined"));
}

#[test]
fn test_secret_requires_unlock() {
    let sandbox = Sandbox::new();
    let args = ["--set", "db.password=hunter2", "--secret", "db.password"];

    let output = sandbox.run(&join(&["get", "db.password"], &args));
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not allowed to access secret key 'db.password'"));
    assert!(!stdout(&output).contains("hunter2"));
    assert!(!stderr(&output).contains("hunter2"));

    let output = sandbox.run(&join(&["get", "db.password", "--unlock"], &args));
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "hunter2");
}

#[test]
fn test_list_hides_secrets_unless_unlocked() {
    let sandbox = Sandbox::new();
    let args = ["--set", "db.password=hunter2", "--set", "db.user=admin", "--secret", "db.password"];

    let output = sandbox.run(&join(&["list", "--json"], &args));
    assert_success(&output);
    let names: Vec<String> = serde_json::from_str(&stdout(&output)).expect("stdout should be valid JSON");
    assert_eq!(names, vec!["db.user"]);

    let output = sandbox.run(&join(&["list", "--unlock"], &args));
    assert_success(&output);
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["db.password", "db.user"]);
}

#[test]
fn test_relocate_and_fallback_options() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "get",
        "old.name",
        "--set",
        "new.name=relocated",
        "--relocate",
        "old.name=new.name",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "relocated");

    let output = sandbox.run(&[
        "get",
        "primary",
        "--set",
        "primary=",
        "--set",
        "backup=b",
        "--fallback",
        "primary=backup",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "b");
}

#[test]
fn test_invalid_pair_is_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list", "--set", "no-equals-sign"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid --set value 'no-equals-sign'"));
}

#[test]
fn test_environment_is_read_by_default() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .command()
        .args(["get", "ordo.test.greeting"])
        .env("ORDO_TEST_GREETING", "from-env")
        .output()
        .expect("Failed to execute 'ordo'");
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "from-env");

    let output = sandbox
        .command()
        .args(["--no-env", "get", "ordo.test.greeting"])
        .env("ORDO_TEST_GREETING", "from-env")
        .output()
        .expect("Failed to execute 'ordo'");
    assert!(!output.status.success());
}

#[test]
fn test_get_json_reports_origin() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["get", "a", "--json", "--set", "a=1"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("stdout should be valid JSON");
    assert_eq!(value["name"], "a");
    assert_eq!(value["value"], "1");
    assert_eq!(value["source_name"], "CommandLine");
    assert_eq!(value["source_ordinal"], 400);
}

#[test]
fn test_values_lists_resolved_values() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["values", "--set", "a=1", "--set", "b=${a}2"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("a=1  (CommandLine)"), "got: {}", out);
    assert!(out.contains("b=12  (CommandLine)"), "got: {}", out);
}

#[test]
fn test_sources_in_priority_order() {
    let sandbox = Sandbox::new();
    sandbox.write(".ordo/config.toml", "a = 1\n");
    let output = sandbox.run(&["sources", "--json", "--set", "a=2"]);
    assert_success(&output);
    let sources: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("stdout should be valid JSON");
    let sources = sources.as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["name"], "CommandLine");
    assert_eq!(sources[0]["ordinal"], 400);
    assert_eq!(sources[1]["ordinal"], 260);
    assert!(
        Path::new(sources[1]["name"].as_str().unwrap()).ends_with(".ordo/config.toml"),
        "unexpected source name: {}",
        sources[1]["name"]
    );
}

#[test]
fn test_lookup_logging_redacts_secrets() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "-v",
        "get",
        "db.password",
        "--unlock",
        "--log-lookups",
        "--set",
        "db.password=hunter2",
        "--secret",
        "db.password",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "hunter2");
    let logs = stderr(&output);
    assert!(logs.contains("core.lookup.resolved"), "got: {}", logs);
    assert!(!logs.contains("hunter2"), "secret leaked into logs: {}", logs);
}

#[test]
fn test_lookup_logging_without_verbose() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["get", "a", "--log-lookups", "--set", "a=1"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "1");
    let logs = stderr(&output);
    assert!(logs.contains("core.lookup.resolved"), "got: {}", logs);
    assert!(!logs.contains("core.config.build_completed"), "got: {}", logs);
}

#[test]
fn test_missing_lookup_logged_at_info() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["get", "absent", "--log-lookups"]);
    assert!(!output.status.success());
    let logs = stderr(&output);
    let line = logs
        .lines()
        .find(|line| line.contains("core.lookup.not_found"))
        .unwrap_or_else(|| panic!("no not_found event in: {}", logs));
    assert!(line.contains(r#""level":"INFO""#), "got: {}", line);
}

#[test]
fn test_stdout_is_clean_without_verbose() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list", "--set", "a=1"]);
    assert_success(&output);
    assert!(!stdout(&output).contains(r#""event":"#));
    assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));
}

#[test]
fn test_completions_generate_script() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completions", "bash"]);
    assert_success(&output);
    assert!(stdout(&output).contains("_ordo()"));
}
