//! # Infrastructure Generator
//!
//! Emits Terraform for an existing API Gateway REST API that proxies every
//! endpoint to one Lambda function.
//!
//! Each single-segment path gets a resource, a method and an `AWS_PROXY`
//! integration sharing one slug. The deployment depends on every integration,
//! in endpoint order. Paths with zero or several segments are reported and
//! skipped; API Gateway needs one resource per segment for those, and parent
//! resources are not modelled.

use std::collections::{HashMap, HashSet};

use super::artifact::{Artifact, Generation};
use super::templates::{render_file, EndpointResources, TerraformTemplate, TfvarsExampleTemplate};
use crate::config::GeneratorConfig;
use crate::naming::resource_slug;
use crate::report::{Action, Notice, Report, Stage};
use crate::schema::Schema;

/// Terraform file with the resource graph
pub const TERRAFORM_FILE: &str = "api_gateway.tf";
/// Example variable values, meant to be copied to `terraform.tfvars`
pub const TFVARS_EXAMPLE_FILE: &str = "terraform.tfvars.example";

/// Accepted endpoints and the deployment's dependency list
#[derive(Debug, Clone, Default)]
pub struct InfraPlan {
    pub resources: Vec<EndpointResources>,
    /// Integration addresses, in the same order as `resources`
    pub dependencies: Vec<String>,
    pub report: Report,
}

/// Escape a value for use inside an HCL quoted string
pub fn hcl_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("${", "$${")
        .replace("%{", "%%{")
}

/// Decide which endpoints get resources
pub fn plan_infrastructure(schema: &Schema) -> InfraPlan {
    let mut plan = InfraPlan::default();
    let mut slugs: HashMap<String, String> = HashMap::new();
    let mut paths: HashSet<&str> = HashSet::new();

    for endpoint in &schema.endpoints {
        let segments = endpoint.path_segments();
        let segment = match segments.as_slice() {
            [segment] => *segment,
            [] => {
                plan.report.push(Notice::new(
                    Stage::Infrastructure,
                    Action::Warning,
                    endpoint.path.as_str(),
                    "root path not supported; no resources generated",
                ));
                continue;
            }
            _ => {
                plan.report.push(Notice::new(
                    Stage::Infrastructure,
                    Action::Warning,
                    endpoint.path.as_str(),
                    "nested paths not supported; no resources generated",
                ));
                continue;
            }
        };

        let slug = resource_slug(segment);
        if let Some(owner) = slugs.get(&slug) {
            let message = if paths.contains(endpoint.path.as_str()) {
                format!(
                    "path already has resources from {owner}; {} needs its method added by hand",
                    endpoint.method
                )
            } else {
                format!("resource name '{slug}' already used by {owner}; no resources generated")
            };
            plan.report.push(Notice::new(
                Stage::Infrastructure,
                Action::Warning,
                endpoint.path.as_str(),
                message,
            ));
            continue;
        }
        slugs.insert(slug.clone(), format!("{} {}", endpoint.method, endpoint.path));
        paths.insert(endpoint.path.as_str());

        tracing::debug!(path = %endpoint.path, slug = %slug, "Planned API Gateway resources");
        let resources = EndpointResources {
            slug,
            path: endpoint.path.clone(),
            path_part: hcl_escape(segment),
            method: endpoint.method.to_string(),
        };
        plan.dependencies.push(resources.integration_address());
        plan.resources.push(resources);
    }
    plan
}

/// Plan and render both Terraform artifacts
///
/// # Errors
///
/// Fails only if a template cannot be rendered.
pub fn generate_infrastructure(
    schema: &Schema,
    config: &GeneratorConfig,
) -> anyhow::Result<Generation> {
    let plan = plan_infrastructure(schema);
    let terraform = &config.terraform;
    let dir = &config.paths.terraform_dir;

    let main = render_file(&TerraformTemplate {
        schema: schema
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        function_name: hcl_escape(&terraform.function_name),
        region: hcl_escape(&terraform.region),
        stage: hcl_escape(&terraform.stage),
        resources: plan.resources,
        dependencies: plan.dependencies,
    })?;
    let example = render_file(&TfvarsExampleTemplate {
        function_name: hcl_escape(&terraform.function_name),
        region: hcl_escape(&terraform.region),
    })?;

    Ok(Generation {
        artifacts: vec![
            Artifact::new(dir.join(TERRAFORM_FILE), main),
            Artifact::new(dir.join(TFVARS_EXAMPLE_FILE), example),
        ],
        report: plan.report,
    })
}
