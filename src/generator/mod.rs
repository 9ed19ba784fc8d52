//! # Generator Module
//!
//! Turns a loaded [`Schema`](crate::schema::Schema) into three disjoint sets
//! of artifacts:
//!
//! - **Scaffolds** ([`scaffold`]) - one write-once Go resolver per endpoint
//!   with its request/response types and a gin handler stub
//! - **Routes** ([`routes`]) - new `router.VERB(...)` statements merged into the
//!   registration region of an existing Go file
//! - **Infrastructure** ([`infra`]) - Terraform for an API Gateway REST API
//!   proxying every endpoint to one Lambda function
//!
//! ## Architecture
//!
//! ```text
//! endpoints.yaml → Schema → plan (pure) → Artifacts + Report → write (pipeline)
//! ```
//!
//! Every generator is a function of the schema, a [`Snapshot`] of what already
//! exists and the [`GeneratorConfig`](crate::config::GeneratorConfig). Only
//! [`generate_project`] touches the filesystem, always relative to an explicit
//! root directory.
//!
//! ## Generated Structure
//!
//! With the default configuration:
//!
//! ```text
//! <root>/
//! ├── api/
//! │   ├── api.go                  # routes file, merged into
//! │   └── <handler>.resolver.go   # one per endpoint, never overwritten
//! └── terraform/
//!     ├── api_gateway.tf          # rewritten when the schema changes
//!     └── terraform.tfvars.example
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use endpointgen::config::GeneratorConfig;
//! use endpointgen::generator::{generate_project, GenerateOptions};
//! use endpointgen::schema::load_schema;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = Path::new("backend");
//! let config = GeneratorConfig::default();
//! let schema = load_schema(&root.join(&config.paths.schema))?;
//! let report = generate_project(&schema, &config, &GenerateOptions::new(root))?;
//! report.print();
//! # Ok(())
//! # }
//! ```
//!
//! ## Template Customization
//!
//! Templates are located in the `templates/` directory:
//!
//! - `resolver.go.txt` - resolver scaffold
//! - `api_gateway.tf.txt` - Terraform resource graph
//! - `terraform.tfvars.example.txt` - example variable values

mod artifact;
pub mod infra;
mod project;
pub mod rewrite;
pub mod routes;
pub mod scaffold;
mod templates;

pub use artifact::{write_artifact, Artifact, Generation, Snapshot, WriteStatus};
pub use infra::{generate_infrastructure, plan_infrastructure, InfraPlan};
pub use project::{
    format_go_files, generate_project, GenerateOptions, GenerationScope, GOFMT_BIN_ENV,
};
pub use rewrite::{rewrite_decimal, rewrite_decimal_models};
pub use routes::{find_region, merge_routes, MergeOutcome, RegistrationRegion, RouteMerge};
pub use scaffold::{plan_scaffolds, render_scaffold, scaffold_path};
pub use templates::{EndpointResources, StructDef};
