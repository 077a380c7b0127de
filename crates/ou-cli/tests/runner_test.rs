use ou_cli::config::{Settings, SeverityLevel};
use ou_cli::runner;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const OPENAPI_JSON: &str = r#"{
  "openapi": "3.0.0",
  "info": { "title": "demo", "version": "1.0.0" },
  "paths": {
    "/users": {
      "get": { "summary": "List users" },
      "post": { "summary": "Create user" }
    },
    "/users/{id}": {
      "delete": { "summary": "Delete user" }
    },
    "/internal/health": {
      "get": { "summary": "Health probe" }
    }
  }
}"#;

fn project(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let openapi = dir.join("openapi.json");
    fs::write(&openapi, OPENAPI_JSON).unwrap();

    let src = dir.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        src.join("api.ts"),
        r#"import { createClient } from "openapi-fetch";
const api = createClient<paths>();
export const listUsers = () => api.GET("/users");
export const removeUser = (id: string) => api.DELETE(`/users/${id}`);
"#,
    )
    .unwrap();

    (openapi, src)
}

fn settings(openapi: std::path::PathBuf, src: std::path::PathBuf) -> Settings {
    Settings {
        openapi,
        src,
        output: None,
        check: false,
        level: SeverityLevel::Error,
        ignore: Vec::new(),
    }
}

#[test]
fn full_run_counts_used_and_unused() {
    let dir = TempDir::new().unwrap();
    let (openapi, src) = project(dir.path());

    let result = runner::run(&settings(openapi, src)).unwrap();
    assert_eq!(result.total, 4);
    assert_eq!(result.used, 2);
    assert_eq!(result.unused, 2);
    assert_eq!(result.exit_code, 0);
}

#[test]
fn json_report_is_written() {
    let dir = TempDir::new().unwrap();
    let (openapi, src) = project(dir.path());
    let output = dir.path().join("report/usage.json");

    let mut settings = settings(openapi, src);
    settings.output = Some(output.clone());
    runner::run(&settings).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["summary"]["total"], 4);
    assert_eq!(report["summary"]["used"], 2);
    assert_eq!(report["summary"]["unused"], 2);

    let first = &report["endpoints"][0];
    assert_eq!(first["method"], "DELETE");
    assert_eq!(first["path"], "/users/{id}");
    assert_eq!(first["usages"][0]["file"], "src/api.ts");
    assert_eq!(first["usages"][0]["line"], 4);
}

#[test]
fn check_mode_fails_on_unused_at_error_level() {
    let dir = TempDir::new().unwrap();
    let (openapi, src) = project(dir.path());

    let mut settings = settings(openapi, src);
    settings.check = true;
    let result = runner::run(&settings).unwrap();
    assert_eq!(result.exit_code, 1);
}

#[test]
fn check_mode_passes_on_unused_at_warn_level() {
    let dir = TempDir::new().unwrap();
    let (openapi, src) = project(dir.path());

    let mut settings = settings(openapi, src);
    settings.check = true;
    settings.level = SeverityLevel::Warn;
    let result = runner::run(&settings).unwrap();
    assert_eq!(result.unused, 2);
    assert_eq!(result.exit_code, 0);
}

#[test]
fn ignored_endpoints_do_not_fail_check_mode() {
    let dir = TempDir::new().unwrap();
    let (openapi, src) = project(dir.path());

    // `* /internal/*` covers every verb under the prefix; `POST /users`
    // names exactly one key and leaves GET /users alone.
    let mut settings = settings(openapi, src);
    settings.check = true;
    settings.ignore = vec!["* /internal/*".to_string(), "POST /users".to_string()];
    let result = runner::run(&settings).unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.used, 2);
    assert_eq!(result.unused, 0);
    assert_eq!(result.exit_code, 0);
}

#[test]
fn repeated_runs_produce_identical_reports() {
    let dir = TempDir::new().unwrap();
    let (openapi, src) = project(dir.path());

    let mut first = settings(openapi.clone(), src.clone());
    first.output = Some(dir.path().join("first.json"));
    runner::run(&first).unwrap();

    let mut second = settings(openapi, src);
    second.output = Some(dir.path().join("second.json"));
    runner::run(&second).unwrap();

    let mut a: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(first.output.unwrap()).unwrap()).unwrap();
    let mut b: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(second.output.unwrap()).unwrap()).unwrap();

    // Only the timestamp may differ between runs over an unchanged tree.
    a["generated_at"] = serde_json::Value::Null;
    b["generated_at"] = serde_json::Value::Null;
    assert_eq!(a, b);
}

#[test]
fn missing_openapi_document_is_an_error() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();

    let result = runner::run(&settings(dir.path().join("missing.json"), src));
    assert!(result.is_err());
}

#[test]
fn missing_source_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let openapi = dir.path().join("openapi.json");
    fs::write(&openapi, OPENAPI_JSON).unwrap();

    let result = runner::run(&settings(openapi, dir.path().join("nope")));
    assert!(result.is_err());
}
