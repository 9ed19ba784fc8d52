use std::fmt;
use std::path::PathBuf;

/// Fatal problems with the endpoint schema
///
/// Any of these aborts the whole run before a generator starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema file does not exist
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },
    /// The schema file exists but could not be read
    Read { path: PathBuf, message: String },
    /// The schema file is not valid YAML/JSON
    Parse { path: PathBuf, message: String },
    /// There is no `endpoints` list at the top level
    MissingEndpoints,
    /// The `endpoints` list is empty
    NoEndpoints,
    /// A record is missing one of `handler`, `method`, `path`
    MissingKey {
        /// Zero-based position of the record
        index: usize,
        key: &'static str,
    },
    /// A record has a value of the wrong shape
    InvalidValue {
        index: usize,
        key: String,
        message: String,
    },
    /// The method is not GET, POST, PUT or DELETE
    UnsupportedMethod { handler: String, method: String },
    /// Two records share a handler name
    DuplicateHandler { handler: String },
    /// Two records share method and path
    DuplicateRoute { method: String, path: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NotFound { path } => {
                write!(f, "schema file not found: {}", path.display())
            }
            SchemaError::Read { path, message } => {
                write!(f, "failed to read schema {}: {message}", path.display())
            }
            SchemaError::Parse { path, message } => {
                write!(f, "failed to parse schema {}: {message}", path.display())
            }
            SchemaError::MissingEndpoints => {
                write!(f, "schema has no top-level 'endpoints' list")
            }
            SchemaError::NoEndpoints => write!(f, "no endpoints defined in schema"),
            SchemaError::MissingKey { index, key } => {
                write!(f, "endpoint #{} is missing required key '{key}'", index + 1)
            }
            SchemaError::InvalidValue {
                index,
                key,
                message,
            } => write!(f, "endpoint #{} has an invalid '{key}': {message}", index + 1),
            SchemaError::UnsupportedMethod { handler, method } => write!(
                f,
                "endpoint '{handler}' uses unsupported method '{method}' (expected GET, POST, PUT or DELETE)"
            ),
            SchemaError::DuplicateHandler { handler } => {
                write!(f, "handler '{handler}' is defined more than once")
            }
            SchemaError::DuplicateRoute { method, path } => {
                write!(f, "route {method} {path} is defined more than once")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
