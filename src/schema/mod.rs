//! # Schema Module
//!
//! Loads the endpoint schema (`endpoints.yaml`) into an immutable in-memory
//! model that every generator reads.
//!
//! ```yaml
//! endpoints:
//!   - handler: getUser
//!     method: GET
//!     path: /user
//!     request: {}
//!     response:
//!       id: uuid
//!       name: string
//! ```
//!
//! Field order inside `request`/`response` and endpoint order are preserved,
//! because both are observable in generated output.

mod error;
mod load;
mod types;

pub use error::SchemaError;
pub use load::{load_schema, parse_schema};
pub use types::{Endpoint, Field, Schema, SUPPORTED_METHODS};
