//! # CLI Module
//!
//! Command-line interface for the `endpointgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Run the generators against a project root:
//!
//! ```bash
//! endpointgen generate --root backend
//! ```
//!
//! Options:
//! - `--root <DIR>` - Directory all configured paths are relative to (default: `.`)
//! - `--schema <FILE>` - Endpoint schema (default: `<root>/api/endpoints.yaml`)
//! - `--config <FILE>` - Generator config (default: `endpointgen.toml` next to the schema)
//! - `--only <PARTS>` - Limit the run to `scaffold`, `routes` and/or `infra`
//! - `--dry-run` - Report what would change without writing
//! - `--format` - Run gofmt on newly written scaffolds
//!
//! ### `check`
//!
//! Lint the schema without writing anything:
//!
//! ```bash
//! endpointgen check --root backend --fail-on-warning
//! ```
//!
//! ### `rewrite-decimal`
//!
//! Switch generated database models from `float64` to `decimal.Decimal`:
//!
//! ```bash
//! endpointgen rewrite-decimal --root backend --dir gen/model --file trade --file price
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Refresh only the Terraform after changing paths
//! endpointgen generate --root backend --only infra
//!
//! # Preview a run with debug logging
//! endpointgen -v generate --root backend --dry-run
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub(crate) use commands::map_only_to_scope;
pub use commands::{run, run_cli, Cli, Commands, OnlyPart, ProjectArgs};
