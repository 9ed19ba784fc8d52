//! Write-once Go resolver scaffolds, one file per endpoint.

use anyhow::Context;
use std::collections::HashMap;
use std::path::PathBuf;

use super::artifact::{Artifact, Generation, Snapshot};
use super::templates::{render_file, ResolverTemplate, StructDef};
use crate::config::{GeneratorConfig, GoConfig, PathsConfig};
use crate::report::{Action, Notice, Stage};
use crate::schema::{Endpoint, Field, Schema};
use crate::type_map::{GoType, TypeMapper, UnknownTypeToken};

const GIN_IMPORT: &str = "github.com/gin-gonic/gin";
const UUID_IMPORT: &str = "github.com/google/uuid";

/// Relative path of the scaffold for `endpoint`
pub fn scaffold_path(endpoint: &Endpoint, paths: &PathsConfig, go: &GoConfig) -> PathBuf {
    paths
        .api_dir
        .join(format!("{}{}", endpoint.artifact_stem(), go.resolver_suffix))
}

/// Align member lines the way gofmt does: name, type and tag in columns
fn align_members(members: &[(String, String, String)]) -> Vec<String> {
    let name_width = members.iter().map(|(n, _, _)| n.chars().count()).max().unwrap_or(0);
    let type_width = members.iter().map(|(_, t, _)| t.chars().count()).max().unwrap_or(0);
    members
        .iter()
        .map(|(name, ty, tag)| format!("{name:<name_width$} {ty:<type_width$} `json:\"{tag}\"`"))
        .collect()
}

/// Build a struct definition; the flag reports whether any member is a UUID
fn struct_def(
    name: String,
    fields: &[Field],
    mapper: TypeMapper,
) -> Result<(StructDef, bool), UnknownTypeToken> {
    let mut uses_uuid = false;
    let mut members = Vec::with_capacity(fields.len());
    for field in fields {
        let ty = mapper.map(&field.type_token)?;
        uses_uuid |= ty.uses_uuid();
        members.push((field.go_name(), ty.to_string(), field.json_name()));
    }
    Ok((
        StructDef {
            name,
            members: align_members(&members),
        },
        uses_uuid,
    ))
}

/// Render the scaffold source for one endpoint
///
/// # Errors
///
/// Fails on an unknown type token when `mapper` is strict, or if the
/// template cannot be rendered.
pub fn render_scaffold(
    endpoint: &Endpoint,
    go: &GoConfig,
    mapper: TypeMapper,
) -> anyhow::Result<String> {
    let request = if endpoint.request.is_empty() {
        None
    } else {
        Some(struct_def(endpoint.request_type_name(), &endpoint.request, mapper)?)
    };
    let (response, response_uuid) =
        struct_def(endpoint.response_type_name(), &endpoint.response, mapper)?;
    let uses_uuid = response_uuid || request.as_ref().is_some_and(|(_, uuid)| *uuid);

    let mut third_party = vec![GIN_IMPORT.to_string()];
    if uses_uuid {
        third_party.push(UUID_IMPORT.to_string());
    }
    let import_groups = vec![
        vec!["context".to_string(), "net/http".to_string()],
        vec![
            format!("{}/internal/domain", go.module),
            format!("{}/internal/logger", go.module),
        ],
        third_party,
    ];

    render_file(&ResolverTemplate {
        package: go.package.clone(),
        method: endpoint.method.to_string(),
        path: endpoint.path.clone(),
        import_groups,
        request: request.map(|(def, _)| def),
        response,
        open_map: GoType::OpenMap.to_string(),
        receiver: go.receiver.clone(),
        receiver_type: go.receiver_type.clone(),
        handler: endpoint.handler.clone(),
    })
}

/// Plan the scaffolds for every endpoint without touching the filesystem
///
/// Endpoints whose file is already in `existing` are skipped; a handler whose
/// snake_case file name collides with an earlier handler's is skipped with a
/// warning. In strict mode every type token is checked before anything is
/// rendered.
///
/// # Errors
///
/// Fails on an unknown type token in strict mode, or on a render failure.
pub fn plan_scaffolds(
    schema: &Schema,
    existing: &Snapshot,
    config: &GeneratorConfig,
) -> anyhow::Result<Generation> {
    let mapper = TypeMapper {
        strict: config.go.strict_types,
    };
    if mapper.strict {
        for endpoint in &schema.endpoints {
            for field in endpoint.request.iter().chain(&endpoint.response) {
                mapper.map(&field.type_token).with_context(|| {
                    format!("Field '{}' of handler '{}'", field.name, endpoint.handler)
                })?;
            }
        }
    }

    let mut generation = Generation::default();
    let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
    for endpoint in &schema.endpoints {
        let path = scaffold_path(endpoint, &config.paths, &config.go);
        let subject = path.display().to_string();

        if let Some(owner) = claimed.get(&path) {
            generation.report.push(Notice::new(
                Stage::Scaffold,
                Action::Warning,
                subject,
                format!(
                    "handler '{}' maps to the same file as '{owner}'; not generated",
                    endpoint.handler
                ),
            ));
            continue;
        }
        claimed.insert(path.clone(), &endpoint.handler);

        if existing.contains(&path) {
            generation.report.push(Notice::new(
                Stage::Scaffold,
                Action::Skipped,
                subject,
                "already exists",
            ));
            continue;
        }

        let contents = render_scaffold(endpoint, &config.go, mapper).with_context(|| {
            format!("Failed to render scaffold for handler '{}'", endpoint.handler)
        })?;
        tracing::debug!(handler = %endpoint.handler, artifact = %subject, "Planned scaffold");
        generation.artifacts.push(Artifact::new(path, contents));
    }
    Ok(generation)
}
