use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::report::Report;

/// A file a generator wants written, relative to the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// What a pure generator hands back to the pipeline
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub artifacts: Vec<Artifact>,
    pub report: Report,
}

/// Relative paths that already exist under the root
///
/// Generators consult the snapshot instead of the filesystem, which keeps
/// them pure and lets tests describe "existing" files directly.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    files: BTreeSet<PathBuf>,
}

impl Snapshot {
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// List the files directly inside `root/dir`, recorded as `dir/<name>`
    ///
    /// A missing directory yields an empty snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the directory exists but cannot be listed.
    pub fn scan_dir(root: &Path, dir: &Path) -> io::Result<Self> {
        let full = root.join(dir);
        if !full.is_dir() {
            return Ok(Self::default());
        }
        let mut files = BTreeSet::new();
        for entry in fs::read_dir(&full)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.insert(dir.join(entry.file_name()));
            }
        }
        Ok(Self { files })
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Result of asking the pipeline to persist one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Modified,
    Unchanged,
}

/// Write `artifact` under `root` unless the file already holds the same bytes
///
/// With `dry_run` the status is computed but nothing touches the disk.
///
/// # Errors
///
/// Fails on any I/O error reading the old contents, creating parent
/// directories or writing the file.
pub fn write_artifact(
    root: &Path,
    artifact: &Artifact,
    dry_run: bool,
) -> anyhow::Result<WriteStatus> {
    use anyhow::Context;

    let target = root.join(&artifact.path);
    let status = if target.exists() {
        let current = fs::read_to_string(&target)
            .with_context(|| format!("Failed to read {}", target.display()))?;
        if current == artifact.contents {
            WriteStatus::Unchanged
        } else {
            WriteStatus::Modified
        }
    } else {
        WriteStatus::Created
    };

    if dry_run || status == WriteStatus::Unchanged {
        return Ok(status);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&target, &artifact.contents)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!(artifact = %artifact.path.display(), ?status, "Wrote artifact");
    Ok(status)
}
