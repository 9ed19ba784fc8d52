//! # Naming
//!
//! Case conversion between the schema's identifier convention and the names
//! used in generated Go code and Terraform resources.
//!
//! - [`to_camel_case`] - `get_user` → `GetUser` (Go type and member names)
//! - [`to_snake_case`] - `getUser` → `get_user` (file names, JSON tags, slugs)
//!
//! The two are inverses on every CamelCase identifier this crate generates:
//! `to_camel_case(&to_snake_case("GetUserResponse")) == "GetUserResponse"`.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static UPPER_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid word boundary regex"));

#[allow(clippy::expect_used)]
static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid case boundary regex"));

/// Convert a snake_case string to CamelCase
///
/// Empty pieces are dropped and only the first character of each piece is
/// changed, so camelCase input keeps its inner capitals.
///
/// ```
/// use endpointgen::naming::to_camel_case;
/// assert_eq!(to_camel_case("user_profile"), "UserProfile");
/// assert_eq!(to_camel_case("getUser"), "GetUser");
/// ```
pub fn to_camel_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a CamelCase or camelCase string to snake_case
///
/// Splits before an uppercase letter followed by lowercase letters, then
/// between a lowercase letter or digit and a following uppercase letter.
///
/// ```
/// use endpointgen::naming::to_snake_case;
/// assert_eq!(to_snake_case("sendSavedStrategySummaryEmails"), "send_saved_strategy_summary_emails");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let first = UPPER_WORD.replace_all(s, "${1}_${2}");
    LOWER_UPPER.replace_all(&first, "${1}_${2}").to_lowercase()
}

/// Go identifier for a schema field name
///
/// Characters Go does not allow in identifiers become `_` before the
/// CamelCase conversion; a leading digit gets an `F` prefix.
pub fn go_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let camel = to_camel_case(&cleaned);
    match camel.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("F{camel}"),
        Some(_) => camel,
        None => "_".to_string(),
    }
}

/// Terraform-safe resource name for a single path segment
///
/// Identity on ordinary identifiers (`sendEmails` → `send_emails`). Anything
/// Terraform rejects in a resource name is replaced with `_`.
pub fn resource_slug(segment: &str) -> String {
    let mut slug: String = to_snake_case(segment)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if slug.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        slug.insert(0, '_');
    }
    slug
}

/// Whether `name` is a valid Go identifier (ASCII letters, digits, `_`)
pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
