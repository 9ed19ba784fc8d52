//! # Schema Linter
//!
//! Reports problems in an endpoint schema that loading accepts but that make
//! generation degrade or produce code that will not compile. Nothing is
//! written; `endpointgen check` prints the issues.
//!
//! ## Checks Performed
//!
//! 1. **Unknown type tokens** - mapped to `string` unless `strict_types` is set
//! 2. **Duplicate Go members** - two fields of one struct map to the same Go name
//! 3. **Scaffold name collisions** - two handlers share a snake_case file name
//! 4. **Infrastructure paths** - nested/root paths and resource name collisions
//! 5. **Shared paths** - one path under several methods; routes merge by path
//! 6. **Untyped responses** - no response fields, so the scaffold returns an open map (info)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use endpointgen::config::GeneratorConfig;
//! use endpointgen::linter::{lint_schema, print_lint_issues};
//! use endpointgen::schema::load_schema;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = load_schema(Path::new("api/endpoints.yaml"))?;
//! let issues = lint_schema(&schema, &GeneratorConfig::default());
//! print_lint_issues(&issues);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::generator::{plan_infrastructure, scaffold_path};
use crate::schema::{Endpoint, Field, Schema};
use crate::type_map::{try_map_type, GoType};


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Error - generation fails or produces code that does not compile
    Error,
    /// Warning - generation degrades or skips something
    Warning,
    /// Info - worth knowing, nothing is lost
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => f.write_str("error"),
            LintSeverity::Warning => f.write_str("warning"),
            LintSeverity::Info => f.write_str("info"),
        }
    }
}

/// A lint issue found in an endpoint schema
#[derive(Debug, Clone, Serialize)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "handler:getUser", "path:/a/b")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "unknown_type_token", "shared_path")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a loaded schema against the effective configuration
pub fn lint_schema(schema: &Schema, config: &GeneratorConfig) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    for endpoint in &schema.endpoints {
        lint_fields(config, &mut issues, endpoint, "request", &endpoint.request);
        lint_fields(config, &mut issues, endpoint, "response", &endpoint.response);
    }
    lint_scaffold_names(config, &mut issues, schema);
    lint_infrastructure(&mut issues, schema);
    lint_shared_paths(&mut issues, schema);
    lint_untyped_responses(&mut issues, schema);
    issues
}

fn lint_fields(
    config: &GeneratorConfig,
    issues: &mut Vec<LintIssue>,
    endpoint: &Endpoint,
    section: &str,
    fields: &[Field],
) {
    let location = format!("handler:{}/{section}", endpoint.handler);
    let mut members: HashMap<String, &str> = HashMap::new();

    for field in fields {
        if let Err(unknown) = try_map_type(&field.type_token) {
            let severity = if config.go.strict_types {
                LintSeverity::Error
            } else {
                LintSeverity::Warning
            };
            let consequence = if config.go.strict_types {
                "generation will fail (strict_types)"
            } else {
                "it will be generated as string"
            };
            issues.push(
                LintIssue::new(
                    format!("{location}.{}", field.name),
                    severity,
                    "unknown_type_token",
                    format!("{unknown}; {consequence}"),
                )
                .with_suggestion(
                    "Use string, int, float, bool or uuid, optionally followed by '?'",
                ),
            );
        }

        let go_name = field.go_name();
        match members.entry(go_name) {
            Entry::Occupied(first) => issues.push(
                LintIssue::new(
                    location.clone(),
                    LintSeverity::Error,
                    "duplicate_member",
                    format!(
                        "fields '{}' and '{}' both become Go member '{}'",
                        first.get(),
                        field.name,
                        first.key()
                    ),
                )
                .with_suggestion("Rename one of the fields"),
            ),
            Entry::Vacant(slot) => {
                slot.insert(&field.name);
            }
        }
    }
}

fn lint_scaffold_names(config: &GeneratorConfig, issues: &mut Vec<LintIssue>, schema: &Schema) {
    let mut owners: BTreeMap<PathBuf, Vec<&str>> = BTreeMap::new();
    for endpoint in &schema.endpoints {
        owners
            .entry(scaffold_path(endpoint, &config.paths, &config.go))
            .or_default()
            .push(&endpoint.handler);
    }
    for (path, handlers) in owners.into_iter().filter(|(_, h)| h.len() > 1) {
        issues.push(
            LintIssue::new(
                format!("file:{}", path.display()),
                LintSeverity::Warning,
                "scaffold_name_collision",
                format!(
                    "handlers {} share this scaffold file; only '{}' gets one",
                    handlers.join(", "),
                    handlers[0]
                ),
            )
            .with_suggestion("Rename handlers so their snake_case forms differ"),
        );
    }
}

fn lint_infrastructure(issues: &mut Vec<LintIssue>, schema: &Schema) {
    let plan = plan_infrastructure(schema);
    for notice in plan.report.warnings() {
        issues.push(LintIssue::new(
            format!("path:{}", notice.subject),
            LintSeverity::Warning,
            "infrastructure",
            notice.message.clone(),
        ));
    }
}

fn lint_shared_paths(issues: &mut Vec<LintIssue>, schema: &Schema) {
    let mut methods: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for endpoint in &schema.endpoints {
        methods
            .entry(endpoint.path.as_str())
            .or_default()
            .push(endpoint.method.to_string());
    }
    for (path, verbs) in methods.into_iter().filter(|(_, v)| v.len() > 1) {
        issues.push(
            LintIssue::new(
                format!("path:{path}"),
                LintSeverity::Warning,
                "shared_path",
                format!(
                    "used by {}; routes are merged by path, so once one method is registered the others are skipped",
                    verbs.join(", ")
                ),
            )
            .with_suggestion("Register the remaining methods by hand"),
        );
    }
}

fn lint_untyped_responses(issues: &mut Vec<LintIssue>, schema: &Schema) {
    for endpoint in schema.endpoints.iter().filter(|e| e.response.is_empty()) {
        issues.push(
            LintIssue::new(
                format!("handler:{}/response", endpoint.handler),
                LintSeverity::Info,
                "untyped_response",
                format!("no response fields; the scaffold uses {}", GoType::OpenMap),
            )
            .with_suggestion("List the response fields to get a typed struct"),
        );
    }
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity: LintSeverity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {suggestion}");
            }
        }
        println!();
    }
}

/// Whether any issue is at or above `threshold`
pub fn has_issues_at(issues: &[LintIssue], threshold: LintSeverity) -> bool {
    let rank = |severity: LintSeverity| match severity {
        LintSeverity::Error => 2,
        LintSeverity::Warning => 1,
        LintSeverity::Info => 0,
    };
    issues.iter().any(|i| rank(i.severity) >= rank(threshold))
}
