#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{demo_project, project_with_schema, read_file, write_file};
use std::path::Path;
use std::process::{Command, Output};

fn endpointgen(args: &[&str], root: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_endpointgen"))
        .args(args)
        .arg("--root")
        .arg(root)
        .env_remove("ENDPOINTGEN_ROOT")
        .env_remove("ENDPOINTGEN_GOFMT_BIN")
        .output()
        .expect("run cli")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_generate_demo_project() {
    let project = demo_project();
    let root = project.path();

    let output = endpointgen(&["generate"], root);
    assert!(output.status.success(), "{output:?}");
    assert!(root.join("api/get_user.resolver.go").exists());
    assert!(root.join("terraform/api_gateway.tf").exists());
    assert!(read_file(root, "api/api.go").contains("\tengine.GET(\"/user\", m.getUser)\n"));
    assert!(stdout(&output).contains("[scaffold] api/get_user.resolver.go: generated"));

    let output = endpointgen(&["generate"], root);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Everything up to date"));
}

#[test]
fn test_cli_generate_dry_run_and_only() {
    let project = demo_project();
    let root = project.path();

    let output = endpointgen(&["generate", "--dry-run"], root);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Dry run"));
    assert!(!root.join("api/get_user.resolver.go").exists());

    let output = endpointgen(&["generate", "--only", "scaffold,infra"], root);
    assert!(output.status.success(), "{output:?}");
    assert!(root.join("api/get_user.resolver.go").exists());
    assert!(!read_file(root, "api/api.go").contains("m.getUser"));
}

#[test]
fn test_cli_generate_explicit_schema_path() {
    let project = demo_project();
    let root = project.path();
    let schema = write_file(
        root,
        "schemas/admin.yaml",
        "endpoints:\n  - handler: getStats\n    method: GET\n    path: /stats\n",
    );

    let output = endpointgen(&["generate", "--schema", schema.to_str().unwrap()], root);
    assert!(output.status.success(), "{output:?}");
    assert!(root.join("api/get_stats.resolver.go").exists());
    assert!(!root.join("api/get_user.resolver.go").exists());
}

#[test]
fn test_cli_missing_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = endpointgen(&["generate"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema file not found"));
}

#[test]
fn test_cli_check() {
    let project = demo_project();
    let output = endpointgen(&["check", "--fail-on-warning"], project.path());
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("4 endpoint(s)"));

    let project = project_with_schema(
        "endpoints:\n  - handler: getOrder\n    method: GET\n    path: /orders/{id}\n",
    );
    let output = endpointgen(&["check"], project.path());
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("nested paths not supported"));

    let output = endpointgen(&["check", "--fail-on-warning"], project.path());
    assert!(!output.status.success());

    let output = endpointgen(&["check", "--json"], project.path());
    assert!(output.status.success(), "{output:?}");
    let issues: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(issues.as_array().map(Vec::len), Some(2));
    assert_eq!(issues[0]["kind"], "infrastructure");
    assert_eq!(issues[1]["severity"], "info");
}

#[test]
fn test_cli_check_fails_on_errors() {
    let project = project_with_schema(
        "endpoints:\n  - handler: createUser\n    method: POST\n    path: /user\n    request:\n      user_id: int\n      userId: int\n",
    );
    let output = endpointgen(&["check"], project.path());
    assert!(!output.status.success());
    assert!(stdout(&output).contains("duplicate_member"));
}

#[test]
fn test_cli_rewrite_decimal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(
        root,
        "models/stock.go",
        "package model\n\nimport (\n\t\"time\"\n)\n\ntype Stock struct {\n\tPrice   float64\n\tUpdated time.Time\n}\n",
    );
    write_file(root, "models/user.go", "package model\n\ntype User struct {\n\tScore float64\n}\n");

    let output = endpointgen(&["rewrite-decimal", "--dir", "models", "--file", "stock"], root);
    assert!(output.status.success(), "{output:?}");

    let stock = read_file(root, "models/stock.go");
    assert!(stock.contains("\tPrice   decimal.Decimal\n"));
    assert!(stock.contains("\t\"time\"\n\n\t\"github.com/shopspring/decimal\"\n"));
    assert!(read_file(root, "models/user.go").contains("float64"));
}

#[cfg(unix)]
#[test]
fn test_cli_generate_format_runs_gofmt() {
    use std::os::unix::fs::PermissionsExt;

    let project = demo_project();
    let root = project.path();
    let bin = tempfile::tempdir().unwrap();
    let log = bin.path().join("gofmt.log");
    let stub = write_file(
        bin.path(),
        "gofmt",
        &format!("#!/bin/sh\necho \"$@\" >> {}\nexit 0\n", log.display()),
    );
    let mut perms = std::fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_endpointgen"))
        .args(["generate", "--only", "scaffold", "--format", "--root"])
        .arg(root)
        .env("ENDPOINTGEN_GOFMT_BIN", &stub)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("gofmt applied to 4 file(s)"));

    let args = std::fs::read_to_string(&log).unwrap();
    assert!(args.starts_with("-w "));
    assert!(args.contains("api/get_user.resolver.go"));
}
