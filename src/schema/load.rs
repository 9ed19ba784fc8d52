use http::Method;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::Path;

use super::error::SchemaError;
use super::types::{Endpoint, Field, Schema, SUPPORTED_METHODS};
use crate::naming::is_go_identifier;

/// Load and validate the endpoint schema at `path`
///
/// JSON input is accepted as well, since it is read with the YAML parser.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the file is missing or unreadable, does not
/// parse, has no endpoints, or contains an invalid record.
pub fn load_schema(path: &Path) -> Result<Schema, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let schema = parse_schema(&content, path)?;
    tracing::debug!(
        schema = %path.display(),
        endpoints = schema.len(),
        "Loaded endpoint schema"
    );
    Ok(schema)
}

/// Parse schema text; `origin` is only used in error messages and [`Schema::source`]
///
/// # Errors
///
/// See [`load_schema`].
pub fn parse_schema(content: &str, origin: &Path) -> Result<Schema, SchemaError> {
    let doc: Value = serde_yaml::from_str(content).map_err(|e| SchemaError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let records = match doc.get("endpoints") {
        Some(Value::Sequence(records)) => records,
        Some(Value::Null) => return Err(SchemaError::NoEndpoints),
        _ => return Err(SchemaError::MissingEndpoints),
    };
    if records.is_empty() {
        return Err(SchemaError::NoEndpoints);
    }

    let mut endpoints = Vec::with_capacity(records.len());
    let mut handlers = HashSet::new();
    let mut routes = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        let endpoint = parse_endpoint(index, record)?;
        if !handlers.insert(endpoint.handler.clone()) {
            return Err(SchemaError::DuplicateHandler {
                handler: endpoint.handler,
            });
        }
        if !routes.insert((endpoint.method.clone(), endpoint.path.clone())) {
            return Err(SchemaError::DuplicateRoute {
                method: endpoint.method.to_string(),
                path: endpoint.path,
            });
        }
        endpoints.push(endpoint);
    }

    Ok(Schema::new(endpoints, origin))
}

fn parse_endpoint(index: usize, record: &Value) -> Result<Endpoint, SchemaError> {
    let Value::Mapping(map) = record else {
        return Err(SchemaError::InvalidValue {
            index,
            key: "endpoint".to_string(),
            message: "expected a mapping".to_string(),
        });
    };

    let handler = required_scalar(index, map, "handler")?;
    if !is_go_identifier(&handler) {
        return Err(SchemaError::InvalidValue {
            index,
            key: "handler".to_string(),
            message: format!("'{handler}' is not a valid Go identifier"),
        });
    }

    let raw_method = required_scalar(index, map, "method")?;
    let method = parse_method(&raw_method).ok_or_else(|| SchemaError::UnsupportedMethod {
        handler: handler.clone(),
        method: raw_method.clone(),
    })?;

    let path = required_scalar(index, map, "path")?;
    if !path.starts_with('/') {
        return Err(SchemaError::InvalidValue {
            index,
            key: "path".to_string(),
            message: format!("'{path}' must start with '/'"),
        });
    }

    let request = fields(index, map, "request")?;
    let response = fields(index, map, "response")?;

    Ok(Endpoint {
        handler,
        method,
        path,
        request,
        response,
    })
}

fn parse_method(raw: &str) -> Option<Method> {
    let method = Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).ok()?;
    SUPPORTED_METHODS.contains(&method).then_some(method)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_scalar(index: usize, map: &Mapping, key: &'static str) -> Result<String, SchemaError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(SchemaError::MissingKey { index, key }),
        Some(value) => {
            let text = scalar_to_string(value).ok_or_else(|| SchemaError::InvalidValue {
                index,
                key: key.to_string(),
                message: "expected a string".to_string(),
            })?;
            let text = text.trim().to_string();
            if text.is_empty() {
                return Err(SchemaError::MissingKey { index, key });
            }
            Ok(text)
        }
    }
}

fn fields(index: usize, map: &Mapping, key: &str) -> Result<Vec<Field>, SchemaError> {
    let members = match map.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Mapping(members)) => members,
        Some(_) => {
            return Err(SchemaError::InvalidValue {
                index,
                key: key.to_string(),
                message: "expected a mapping of field name to type".to_string(),
            })
        }
    };

    members
        .iter()
        .map(|(name, token)| {
            let name = scalar_to_string(name).ok_or_else(|| SchemaError::InvalidValue {
                index,
                key: key.to_string(),
                message: "field names must be strings".to_string(),
            })?;
            let token = scalar_to_string(token).ok_or_else(|| SchemaError::InvalidValue {
                index,
                key: format!("{key}.{name}"),
                message: "type must be a string such as 'string' or 'uuid?'".to_string(),
            })?;
            Ok(Field::new(name, token.trim()))
        })
        .collect()
}
