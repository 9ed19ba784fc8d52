#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures for integration tests
//!
//! Every test works on its own copy of a project root inside a
//! [`tempfile::TempDir`], so tests can run in parallel and never touch
//! `demos/`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Project root of the bundled demo backend
pub fn demo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join("backend")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// A fresh copy of the demo backend
pub fn demo_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&demo_root(), dir.path());
    dir
}

/// Write `contents` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

pub fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
}

/// Minimal routes file with one registration and a blank line before `return`
pub const ROUTES_GO: &str = "package api

import \"github.com/gin-gonic/gin\"

type ApiHandler struct{}

func (m ApiHandler) InitializeRouterEngine() *gin.Engine {
\tengine := gin.Default()
\tengine.GET(\"/health\", m.health)

\treturn engine
}
";

/// A project root with `api/api.go` set to [`ROUTES_GO`] and the given schema
pub fn project_with_schema(schema_yaml: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "api/api.go", ROUTES_GO);
    write_file(dir.path(), "api/endpoints.yaml", schema_yaml);
    dir
}
