use std::fs;
use std::path::PathBuf;
use std::process::Output;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("dsl_factory_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Config replacing the English rules with a single `-en` plural rule.
fn write_config(dir: &TempDir) -> PathBuf {
    let yaml = r#"inflections:
  base: empty
  singulars:
    - pattern: "en$"
      replacement: ""
  plurals:
    - pattern: "$"
      replacement: "en"
"#;
    let path = dir.join("dsl.yaml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_dsl-factory"))
        .args(args)
        .output()
        .expect("failed to run dsl-factory")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Inflection commands
// ---------------------------------------------------------------------------

#[test]
fn singularize_uses_english_rules_by_default() {
    let output = run(&["singularize", "items", "categories", "people"]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["item", "category", "person"]);
}

#[test]
fn pluralize_uses_english_rules_by_default() {
    let output = run(&["pluralize", "box", "child"]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["boxes", "children"]);
}

#[test]
fn singularize_honors_config_rules() {
    let dir = TempDir::new("singularize_config");
    let config = write_config(&dir);

    let output = run(&["singularize", "posten", "items", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["post", "items"]);
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new("missing_config");
    let missing = dir.join("nope.yaml");

    let output = run(&["pluralize", "box", "--config", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("nope.yaml"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// Check command
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_plural_names() {
    let output = run(&["check", "items", "assignments", "--format", "json"]);
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["field"], "items");
    assert_eq!(reports[0]["singular"], "item");
    assert_eq!(reports[1]["singular"], "assignment");
    assert!(reports[1]["error"].is_null());
}

#[test]
fn check_rejects_singular_names() {
    let output = run(&["check", "items", "item", "--format", "json"]);
    assert!(!output.status.success());

    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(reports[1]["singular"].is_null());
    assert!(reports[1]["error"].as_str().unwrap().contains("item"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 2"), "stderr: {stderr}");
}

#[test]
fn check_table_output_with_config() {
    let dir = TempDir::new("check_table");
    let config = write_config(&dir);

    let output = run(&["check", "posten", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("FIELD"));
    assert!(out.contains("posten"));
    assert!(out.contains("ok"));
    assert!(out.contains("post"));
}
