//! Generator configuration
//!
//! Projects can override the built-in layout and Go/Terraform conventions via
//! an `endpointgen.toml` that sits alongside the endpoint schema. Every path
//! in it is relative to the root directory passed to the generators.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the schema when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "endpointgen.toml";

/// Where the generator reads and writes, relative to the root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Endpoint schema
    pub schema: PathBuf,
    /// Directory that receives the resolver scaffolds
    pub api_dir: PathBuf,
    /// Go file holding the route registration region
    pub routes_file: PathBuf,
    /// Directory that receives the Terraform artifacts
    pub terraform_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema: PathBuf::from("api/endpoints.yaml"),
            api_dir: PathBuf::from("api"),
            routes_file: PathBuf::from("api/api.go"),
            terraform_dir: PathBuf::from("terraform"),
        }
    }
}

/// Conventions of the Go codebase the scaffolds land in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GoConfig {
    /// `package` clause of generated files
    pub package: String,
    /// Go module path; `internal/domain` and `internal/logger` are imported from it
    pub module: String,
    /// Receiver variable of generated handler methods
    pub receiver: String,
    /// Receiver type of generated handler methods
    pub receiver_type: String,
    /// Suffix appended to the snake_case handler name to form the file name
    pub resolver_suffix: String,
    /// Function used as the registration region when it has no routes yet
    pub registration_function: String,
    /// Reject unknown type tokens instead of mapping them to `string`
    pub strict_types: bool,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self {
            package: "api".to_string(),
            module: "factorbacktest".to_string(),
            receiver: "m".to_string(),
            receiver_type: "ApiHandler".to_string(),
            resolver_suffix: ".resolver.go".to_string(),
            registration_function: "InitializeRouterEngine".to_string(),
            strict_types: false,
        }
    }
}

/// Defaults written into the Terraform variables and the example values file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TerraformConfig {
    /// Lambda function every integration proxies to
    pub function_name: String,
    /// AWS region
    pub region: String,
    /// Deployment stage name
    pub stage: String,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            function_name: "api-handler".to_string(),
            region: "us-east-1".to_string(),
            stage: "prod".to_string(),
        }
    }
}

/// Complete generator configuration loaded from `endpointgen.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub paths: PathsConfig,
    pub go: GoConfig,
    pub terraform: TerraformConfig,
}

/// Load generator configuration from a TOML file
///
/// # Returns
///
/// `Ok(Some(config))` if the file exists and parses,
/// `Ok(None)` if it does not exist (not an error),
/// `Err` if it exists but fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the schema
/// 3. None (built-in defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, schema_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    let candidate = schema_path.parent()?.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Load the effective configuration for a run
///
/// An explicitly requested config file must exist; an auto-detected one is
/// optional.
pub fn resolve_config(
    explicit_path: Option<&Path>,
    schema_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    let Some(path) = resolve_config_path(explicit_path, schema_path) else {
        return Ok(GeneratorConfig::default());
    };
    match load_config(&path)? {
        Some(config) => {
            tracing::debug!(config = %path.display(), "Loaded generator config");
            Ok(config)
        }
        None => anyhow::bail!("Config file not found: {}", path.display()),
    }
}
