//! # Type Mapper
//!
//! Maps schema type tokens (`string`, `int`, `float`, `bool`, `uuid`, with an
//! optional trailing `?`) to Go types.
//!
//! Optionality is a modifier: `uuid?` maps to a pointer to whatever `uuid`
//! maps to. Unknown tokens degrade to `string` unless the mapper is strict.

use std::fmt;

/// Marker suffix that makes a type token optional
pub const OPTIONAL_MARKER: char = '?';

/// A Go type produced for a schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    /// `string`
    String,
    /// `int`
    Int,
    /// `float64`
    Float64,
    /// `bool`
    Bool,
    /// `uuid.UUID` from `github.com/google/uuid`
    Uuid,
    /// `*T`, used for optional fields
    Pointer(Box<GoType>),
    /// `map[string]interface{}`, the open container for untyped responses
    OpenMap,
}

impl GoType {
    /// Whether the rendered type needs the `github.com/google/uuid` import
    pub fn uses_uuid(&self) -> bool {
        match self {
            GoType::Uuid => true,
            GoType::Pointer(inner) => inner.uses_uuid(),
            _ => false,
        }
    }

    /// Wrap in the nullable representation
    pub fn optional(self) -> Self {
        GoType::Pointer(Box::new(self))
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::String => f.write_str("string"),
            GoType::Int => f.write_str("int"),
            GoType::Float64 => f.write_str("float64"),
            GoType::Bool => f.write_str("bool"),
            GoType::Uuid => f.write_str("uuid.UUID"),
            GoType::Pointer(inner) => write!(f, "*{inner}"),
            GoType::OpenMap => f.write_str("map[string]interface{}"),
        }
    }
}

/// A type token that is not in the fixed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeToken {
    /// The offending token, without any optional marker
    pub token: String,
}

impl fmt::Display for UnknownTypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown type token '{}' (expected one of: string, int, float, bool, uuid)",
            self.token
        )
    }
}

impl std::error::Error for UnknownTypeToken {}

fn base_type(token: &str) -> Option<GoType> {
    match token {
        "string" => Some(GoType::String),
        "int" => Some(GoType::Int),
        "float" => Some(GoType::Float64),
        "bool" => Some(GoType::Bool),
        "uuid" => Some(GoType::Uuid),
        _ => None,
    }
}

/// Map a type token, rejecting anything outside the fixed table
///
/// # Errors
///
/// Returns [`UnknownTypeToken`] for a token (after stripping `?`) that is not
/// `string`, `int`, `float`, `bool` or `uuid`.
pub fn try_map_type(token: &str) -> Result<GoType, UnknownTypeToken> {
    if let Some(base) = token.strip_suffix(OPTIONAL_MARKER) {
        return try_map_type(base).map(GoType::optional);
    }
    base_type(token).ok_or_else(|| UnknownTypeToken {
        token: token.to_string(),
    })
}

/// Map a type token, falling back to `string` for unknown tokens
///
/// ```
/// use endpointgen::type_map::{map_type, GoType};
/// assert_eq!(map_type("uuid?").to_string(), "*uuid.UUID");
/// assert_eq!(map_type("decimal"), GoType::String);
/// ```
pub fn map_type(token: &str) -> GoType {
    if let Some(base) = token.strip_suffix(OPTIONAL_MARKER) {
        return map_type(base).optional();
    }
    base_type(token).unwrap_or_else(|| {
        tracing::debug!(token = %token, "Unknown type token, falling back to string");
        GoType::String
    })
}

/// Type mapping policy chosen by configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper {
    /// Reject unknown tokens instead of degrading them to `string`
    pub strict: bool,
}

impl TypeMapper {
    /// Map a token according to the configured policy
    ///
    /// # Errors
    ///
    /// Only in strict mode, for tokens outside the fixed table.
    pub fn map(&self, token: &str) -> Result<GoType, UnknownTypeToken> {
        if self.strict {
            try_map_type(token)
        } else {
            Ok(map_type(token))
        }
    }
}
