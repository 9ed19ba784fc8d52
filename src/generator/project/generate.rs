use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::format::format_go_files;
use crate::config::GeneratorConfig;
use crate::generator::artifact::{write_artifact, Artifact, Snapshot, WriteStatus};
use crate::generator::infra::generate_infrastructure;
use crate::generator::routes::{merge_routes, MergeOutcome};
use crate::generator::scaffold::plan_scaffolds;
use crate::report::{Action, Notice, Report, Stage};
use crate::schema::Schema;

/// Which generators to run
///
/// Allows selective runs, e.g. only refreshing the Terraform after a path
/// change without touching Go sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    /// Write missing resolver scaffolds
    pub scaffold: bool,
    /// Merge new routes into the routes file
    pub routes: bool,
    /// Regenerate the Terraform artifacts
    pub infrastructure: bool,
}

impl GenerationScope {
    /// Run every generator
    pub fn all() -> Self {
        Self {
            scaffold: true,
            routes: true,
            infrastructure: true,
        }
    }

    /// Run no generator; combine with field updates to pick a subset
    pub fn none() -> Self {
        Self {
            scaffold: false,
            routes: false,
            infrastructure: false,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

/// Options of one pipeline run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory every configured path is relative to
    pub root: PathBuf,
    pub scope: GenerationScope,
    /// Compute and report without writing
    pub dry_run: bool,
    /// Run gofmt on newly written Go files
    pub format: bool,
}

impl GenerateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scope: GenerationScope::all(),
            dry_run: false,
            format: false,
        }
    }
}

/// Persist artifacts and report what happened to each
fn write_all(
    root: &Path,
    stage: Stage,
    artifacts: &[Artifact],
    dry_run: bool,
    report: &mut Report,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for artifact in artifacts {
        let status = write_artifact(root, artifact, dry_run)?;
        let subject = artifact.path.display().to_string();
        let notice = match status {
            WriteStatus::Created => Notice::new(stage, Action::Generated, subject, "generated"),
            WriteStatus::Modified => Notice::new(stage, Action::Updated, subject, "updated"),
            WriteStatus::Unchanged => Notice::new(stage, Action::Unchanged, subject, "up to date"),
        };
        report.push(notice);
        if status != WriteStatus::Unchanged {
            written.push(artifact.path.clone());
        }
    }
    Ok(written)
}

fn run_scaffold(
    schema: &Schema,
    config: &GeneratorConfig,
    options: &GenerateOptions,
    report: &mut Report,
) -> anyhow::Result<()> {
    let existing = Snapshot::scan_dir(&options.root, &config.paths.api_dir).with_context(|| {
        format!("Failed to list {}", options.root.join(&config.paths.api_dir).display())
    })?;
    let generation = plan_scaffolds(schema, &existing, config)?;
    report.extend(generation.report);
    let written = write_all(
        &options.root,
        Stage::Scaffold,
        &generation.artifacts,
        options.dry_run,
        report,
    )?;

    if options.format && !options.dry_run && !written.is_empty() {
        match format_go_files(&options.root, &written) {
            Ok(()) => report.push(Notice::new(
                Stage::Format,
                Action::Updated,
                config.paths.api_dir.display().to_string(),
                format!("gofmt applied to {} file(s)", written.len()),
            )),
            Err(e) => report.push(Notice::new(
                Stage::Format,
                Action::Warning,
                config.paths.api_dir.display().to_string(),
                format!("{e}; generated files left unformatted"),
            )),
        }
    }
    Ok(())
}

fn run_routes(
    schema: &Schema,
    config: &GeneratorConfig,
    options: &GenerateOptions,
    report: &mut Report,
) -> anyhow::Result<()> {
    let relative = &config.paths.routes_file;
    let subject = relative.display().to_string();
    let path = options.root.join(relative);
    if !path.exists() {
        report.push(Notice::new(
            Stage::Routes,
            Action::Warning,
            subject,
            "routes file not found; register routes manually",
        ));
        return Ok(());
    }

    let source =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let merge = merge_routes(&source, &schema.endpoints, &config.go, &subject)?;
    report.extend(merge.report);
    if let MergeOutcome::Updated(merged) = merge.outcome {
        if !options.dry_run {
            fs::write(&path, merged)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(routes_file = %subject, added = merge.added.len(), "Merged routes");
        }
    }
    Ok(())
}

fn run_infrastructure(
    schema: &Schema,
    config: &GeneratorConfig,
    options: &GenerateOptions,
    report: &mut Report,
) -> anyhow::Result<()> {
    let generation = generate_infrastructure(schema, config)?;
    report.extend(generation.report);
    write_all(
        &options.root,
        Stage::Infrastructure,
        &generation.artifacts,
        options.dry_run,
        report,
    )?;
    Ok(())
}

/// Run the selected generators against `options.root`
///
/// Generators run in the order scaffold, routes, infrastructure. A fatal
/// error stops the run; artifacts already written stay written.
///
/// # Errors
///
/// Fails on I/O errors, on an unknown type token in strict mode, or when a
/// route merge would break the routes file.
pub fn generate_project(
    schema: &Schema,
    config: &GeneratorConfig,
    options: &GenerateOptions,
) -> anyhow::Result<Report> {
    tracing::info!(
        root = %options.root.display(),
        endpoints = schema.len(),
        dry_run = options.dry_run,
        "Generating"
    );
    let mut report = Report::new();
    if options.scope.scaffold {
        run_scaffold(schema, config, options, &mut report)?;
    }
    if options.scope.routes {
        run_routes(schema, config, options, &mut report)?;
    }
    if options.scope.infrastructure {
        run_infrastructure(schema, config, options, &mut report)?;
    }
    Ok(report)
}
