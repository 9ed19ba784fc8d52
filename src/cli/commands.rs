use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{resolve_config, GeneratorConfig, PathsConfig};
use crate::generator::{generate_project, rewrite_decimal_models, GenerateOptions, GenerationScope};
use crate::linter::{has_issues_at, lint_schema, print_lint_issues, LintSeverity};
use crate::logging::{init_logging, LogConfig};
use crate::schema::{load_schema, Schema};

/// Command-line interface for endpointgen
///
/// Generates gin handler scaffolds, route registrations and API Gateway
/// Terraform from a declarative endpoint schema.
#[derive(Parser, Debug)]
#[command(name = "endpointgen", version)]
#[command(
    about = "Schema-driven generator for gin handlers, routes and API Gateway Terraform",
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging (overrides ENDPOINTGEN_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to find the project, its schema and its config
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Root directory all configured paths are relative to
    #[arg(long, default_value = ".", env = "ENDPOINTGEN_ROOT")]
    pub root: PathBuf,

    /// Path to the endpoint schema (YAML or JSON)
    /// If not provided, uses paths.schema from the config, relative to --root
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Path to the generator configuration file (endpointgen.toml)
    /// If not provided, will auto-detect alongside the schema
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate scaffolds, merge routes and write Terraform
    Generate {
        #[command(flatten)]
        project: ProjectArgs,

        /// Perform a dry run: show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Limit generation to specific parts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// Run gofmt on newly written Go files (binary: ENDPOINTGEN_GOFMT_BIN)
        #[arg(long, default_value_t = false)]
        format: bool,
    },
    /// Lint the endpoint schema without writing anything
    ///
    /// Reports unknown type tokens, Go member name clashes, scaffold file
    /// name collisions, paths the Terraform generator cannot express and
    /// paths shared by several methods.
    Check {
        #[command(flatten)]
        project: ProjectArgs,

        /// Exit with an error code if any warning or error is found
        #[arg(long, default_value_t = false)]
        fail_on_warning: bool,

        /// Print the issues as a JSON array instead of the grouped listing
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replace float64 with decimal.Decimal in generated model files
    RewriteDecimal {
        /// Root directory --dir is relative to
        #[arg(long, default_value = ".", env = "ENDPOINTGEN_ROOT")]
        root: PathBuf,

        /// Directory holding the model files
        #[arg(long)]
        dir: PathBuf,

        /// Rewrite files whose name contains this (repeatable)
        #[arg(long = "file", required = true, num_args = 1..)]
        files: Vec<String>,

        /// Show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

/// Generators that can be selected with `--only`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// Resolver scaffolds (request/response types and handler stubs)
    Scaffold,
    /// Route registrations in the routes file
    Routes,
    /// Terraform for API Gateway
    Infra,
}

/// Convert CLI `--only` parts to a `GenerationScope`
///
/// If `only` is `None`, every generator runs.
pub(crate) fn map_only_to_scope(only: Option<&[OnlyPart]>) -> GenerationScope {
    let Some(parts) = only else {
        return GenerationScope::all();
    };
    let mut scope = GenerationScope::none();
    for part in parts {
        match part {
            OnlyPart::Scaffold => scope.scaffold = true,
            OnlyPart::Routes => scope.routes = true,
            OnlyPart::Infra => scope.infrastructure = true,
        }
    }
    scope
}

/// Load the schema and the effective config for a project
///
/// An explicit `--config` decides where the schema lives unless `--schema`
/// is also given; otherwise the schema path is resolved first and the config
/// is looked up next to it.
fn load_project(args: &ProjectArgs) -> anyhow::Result<(Schema, GeneratorConfig)> {
    let explicit = match &args.config {
        Some(path) => Some(resolve_config(Some(path.as_path()), path)?),
        None => None,
    };
    let schema_path = match &args.schema {
        Some(path) => path.clone(),
        None => {
            let relative = explicit
                .as_ref()
                .map(|config| config.paths.schema.clone())
                .unwrap_or_else(|| PathsConfig::default().schema);
            args.root.join(relative)
        }
    };
    let config = match explicit {
        Some(config) => config,
        None => resolve_config(None, &schema_path)?,
    };
    let schema = load_schema(&schema_path)?;
    Ok((schema, config))
}

/// Execute a parsed command
///
/// # Errors
///
/// Returns an error if:
/// - The schema or config cannot be loaded or is invalid
/// - Generation fails (I/O, strict type mapping, a merge that would break the routes file)
/// - `check` finds an error-level issue, or any issue with `--fail-on-warning`
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            project,
            dry_run,
            only,
            format,
        } => {
            let (schema, config) = load_project(&project)?;
            let options = GenerateOptions {
                root: project.root.clone(),
                scope: map_only_to_scope(only.as_deref()),
                dry_run,
                format,
            };
            let report = generate_project(&schema, &config, &options)?;
            report.print();
            let warnings = report.warnings().count();
            if dry_run {
                println!("🔍 Dry run: nothing was written");
            } else if !report.has_changes() {
                println!("✅ Everything up to date");
            }
            if warnings > 0 {
                println!("⚠️  {warnings} warning(s)");
            }
            Ok(())
        }
        Commands::Check {
            project,
            fail_on_warning,
            json,
        } => {
            let (schema, config) = load_project(&project)?;
            let issues = lint_schema(&schema, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&issues)?);
            } else {
                println!(
                    "📋 {} endpoint(s) in {}",
                    schema.len(),
                    schema.source.display()
                );
                print_lint_issues(&issues);
            }
            if has_issues_at(&issues, LintSeverity::Error)
                || (fail_on_warning && has_issues_at(&issues, LintSeverity::Warning))
            {
                anyhow::bail!("check found {} issue(s)", issues.len());
            }
            Ok(())
        }
        Commands::RewriteDecimal {
            root,
            dir,
            files,
            dry_run,
        } => {
            let report =
                rewrite_decimal_models(&root, &dir, &files, dry_run).with_context(|| {
                    format!("Failed to rewrite models in {}", root.join(&dir).display())
                })?;
            report.print();
            if dry_run {
                println!("🔍 Dry run: nothing was written");
            }
            Ok(())
        }
    }
}

/// Parse arguments, set up logging and execute the command
///
/// # Errors
///
/// See [`run`]; also fails if logging cannot be initialized.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config)?;
    run(cli)
}
