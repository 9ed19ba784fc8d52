//! # endpointgen
//!
//! **endpointgen** keeps a Go `gin` API and its AWS API Gateway Terraform in step
//! with a single declarative list of endpoints.
//!
//! ## Overview
//!
//! Given an `endpoints.yaml` describing each endpoint's handler, method, path and
//! request/response fields, endpointgen:
//!
//! - writes one resolver scaffold per endpoint (request/response types plus a
//!   handler stub), never touching a scaffold once it exists
//! - merges registrations for new paths into the existing route registration
//!   section of the Go router file, leaving every other byte alone
//! - writes Terraform wiring each single-segment path to one Lambda function
//!   through an API Gateway REST API
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`naming`]** - camelCase/snake_case conversion and Terraform resource slugs
//! - **[`type_map`]** - schema type tokens to Go types
//! - **[`schema`]** - loading and validating the endpoint schema
//! - **[`generator`]** - scaffold, route merge and Terraform generation plus the pipeline
//! - **[`linter`]** - schema checks that do not write anything
//! - **[`report`]** - the notices every generator returns instead of printing
//! - **[`config`]** - `endpointgen.toml` project configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `endpointgen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(endpointgen)
//!     participant Schema as schema::load_schema
//!     participant Scaffold as generator::scaffold
//!     participant Routes as generator::routes
//!     participant Infra as generator::infra
//!     participant FS as File System
//!
//!     User->>CLI: endpointgen generate --root backend
//!     CLI->>Schema: load_schema("backend/api/endpoints.yaml")
//!     Schema-->>CLI: Schema (validated endpoints)
//!
//!     CLI->>FS: list api/
//!     CLI->>Scaffold: plan_scaffolds(schema, snapshot, config)
//!     Scaffold-->>CLI: Artifacts + Report
//!     CLI->>FS: write missing *.resolver.go
//!
//!     CLI->>FS: read api/api.go
//!     CLI->>Routes: merge_routes(source, endpoints)
//!     Routes->>Routes: tree-sitter parse, find region
//!     Routes-->>CLI: merged source + Report
//!     CLI->>FS: write api/api.go
//!
//!     CLI->>Infra: generate_infrastructure(schema, config)
//!     Infra-->>CLI: api_gateway.tf + tfvars example
//!     CLI->>FS: write terraform/ (when changed)
//!
//!     CLI-->>User: Report (generated / skipped / warnings)
//! ```
//!
//! Running the pipeline twice in a row writes nothing the second time.
//!
//! ## Quick Start
//!
//! ```yaml
//! # backend/api/endpoints.yaml
//! endpoints:
//!   - handler: getUser
//!     method: GET
//!     path: /user
//!     response:
//!       id: uuid
//!       name: string
//!       nickname: string?
//! ```
//!
//! ```bash
//! endpointgen check --root backend
//! endpointgen generate --root backend --format
//! ```
//!
//! ## Configuration
//!
//! Conventions such as the Go module path, the receiver of handler methods or
//! the Lambda function name come from an optional `endpointgen.toml`; see
//! [`config::GeneratorConfig`].

pub mod cli;
pub mod config;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod naming;
pub mod report;
pub mod schema;
pub mod type_map;

pub use config::GeneratorConfig;
pub use report::{Action, Notice, Report, Stage};
pub use schema::{load_schema, Endpoint, Field, Schema, SchemaError};
