use http::Method;
use std::path::PathBuf;

use crate::naming::{go_identifier, to_camel_case, to_snake_case};

/// HTTP verbs the route merger recognises, in the order they are checked
pub const SUPPORTED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// One request or response member as declared in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as written in the schema
    pub name: String,
    /// Type token, e.g. `string` or `uuid?`
    pub type_token: String,
}

impl Field {
    pub fn new(name: impl Into<String>, type_token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_token: type_token.into(),
        }
    }

    /// Go struct member name (`reply_email` → `ReplyEmail`)
    pub fn go_name(&self) -> String {
        go_identifier(&self.name)
    }

    /// JSON wire name (`replyEmail` → `reply_email`)
    pub fn json_name(&self) -> String {
        to_snake_case(&self.name)
    }
}

/// One endpoint record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Handler method name; keys the scaffold file and the generated type names
    pub handler: String,
    /// One of [`SUPPORTED_METHODS`]
    pub method: Method,
    /// Route path, always starting with `/`
    pub path: String,
    /// Request body fields; empty means no request type is generated
    pub request: Vec<Field>,
    /// Response body fields; empty means an open map response
    pub response: Vec<Field>,
}

impl Endpoint {
    /// CamelCase prefix shared by the request and response type names
    pub fn type_prefix(&self) -> String {
        to_camel_case(&self.handler)
    }

    pub fn request_type_name(&self) -> String {
        format!("{}Request", self.type_prefix())
    }

    pub fn response_type_name(&self) -> String {
        format!("{}Response", self.type_prefix())
    }

    /// snake_case stem of the scaffold file name
    pub fn artifact_stem(&self) -> String {
        to_snake_case(&self.handler)
    }

    /// Non-empty `/`-separated segments of the path
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// The loaded schema, read-only after [`crate::schema::load_schema`]
#[derive(Debug, Clone)]
pub struct Schema {
    /// Endpoints in declaration order
    pub endpoints: Vec<Endpoint>,
    /// File the schema was read from
    pub source: PathBuf,
}

impl Schema {
    pub fn new(endpoints: Vec<Endpoint>, source: impl Into<PathBuf>) -> Self {
        Self {
            endpoints,
            source: source.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
