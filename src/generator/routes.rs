//! # Route Registry Merger
//!
//! Inserts `router.VERB("/path", receiver.handler)` statements for new
//! endpoints into the route registration region of an existing Go file.
//!
//! The region is found structurally on a tree-sitter parse of the file:
//!
//! - **start**: the first statement at the top level of a function or method
//!   body that calls `<ident>.GET|POST|PUT|DELETE(...)`
//! - **end**: the first `return` statement after it in the same body
//!
//! The configured registration function is searched first. When it has no
//! registration calls yet, a body ending in `return <ident>` still makes a
//! region. Any other function is used only when the configured one yields
//! nothing, taking the first with a start and an end.
//!
//! New lines are inserted directly before the end of the region. No existing
//! byte is modified, so comments, blank lines and unrelated code survive.
//! The merged source is re-parsed and rejected if it no longer parses.

use anyhow::{bail, Context};
use tree_sitter::{Node, Parser, Tree};

use crate::config::GoConfig;
use crate::report::{Action, Notice, Report, Stage};
use crate::schema::{Endpoint, SUPPORTED_METHODS};

/// What the merge did to the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No registration region; the file must be edited by hand
    RegionNotFound,
    /// Every endpoint path is already registered
    Unchanged,
    /// New source with the added registrations
    Updated(String),
}

/// Result of [`merge_routes`]
#[derive(Debug, Clone)]
pub struct RouteMerge {
    pub outcome: MergeOutcome,
    /// Registration statements added, without indentation
    pub added: Vec<String>,
    pub report: Report,
}

/// The registration region discovered in a routes file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRegion {
    /// Router variable the calls are made on (`engine`)
    pub router: String,
    /// Variable that owns the handler methods (`m`)
    pub receiver: String,
    /// Leading whitespace for new lines
    pub indent: String,
    /// `(VERB, path)` of every registration already in the region
    pub registered: Vec<(String, String)>,
    /// Byte offset new lines are inserted at
    insert_at: usize,
    /// Whether a blank line must follow the new lines
    needs_blank_line: bool,
}

impl RegistrationRegion {
    /// The statement registering `endpoint`, without indentation
    pub fn registration_line(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}.{}({}, {}.{})",
            self.router,
            endpoint.method,
            go_string_literal(&endpoint.path),
            self.receiver,
            endpoint.handler
        )
    }

    /// Whether `path` is already registered, regardless of method
    pub fn registered_method(&self, path: &str) -> Option<&str> {
        self.registered
            .iter()
            .find(|(_, registered)| registered == path)
            .map(|(method, _)| method.as_str())
    }
}

fn parse_go(source: &str) -> anyhow::Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .context("Failed to load Go grammar")?;
    parser
        .parse(source, None)
        .context("Go parser produced no syntax tree")
}

fn text(node: Node<'_>, source: &str) -> String {
    source[node.byte_range()].to_string()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Statements of a block, whichever way the grammar nests them
fn body_statements(body: Node<'_>) -> Vec<Node<'_>> {
    let mut statements = Vec::new();
    for child in named_children(body) {
        if child.kind() == "statement_list" {
            statements.extend(named_children(child));
        } else {
            statements.push(child);
        }
    }
    statements
}

fn is_string_literal(node: &Node<'_>) -> bool {
    matches!(node.kind(), "interpreted_string_literal" | "raw_string_literal")
}

/// A `router.VERB(...)` call statement
struct Registration {
    router: String,
    verb: String,
    path: Option<String>,
    /// Operand of the last `x.handler` argument; middleware comes before it
    handler_owner: Option<String>,
}

fn registration(statement: Node<'_>, source: &str) -> Option<Registration> {
    if statement.kind() != "expression_statement" {
        return None;
    }
    let call = named_children(statement).into_iter().next()?;
    if call.kind() != "call_expression" {
        return None;
    }
    let function = call.child_by_field_name("function")?;
    if function.kind() != "selector_expression" {
        return None;
    }
    let operand = function.child_by_field_name("operand")?;
    if operand.kind() != "identifier" {
        return None;
    }
    let verb = text(function.child_by_field_name("field")?, source);
    if !SUPPORTED_METHODS.iter().any(|m| m.as_str() == verb) {
        return None;
    }

    let arguments = named_children(call.child_by_field_name("arguments")?);
    let path = arguments
        .iter()
        .find(|arg| is_string_literal(arg))
        .map(|arg| unquote(&text(*arg, source)));
    let handler_owner = arguments
        .iter()
        .rev()
        .filter(|arg| arg.kind() == "selector_expression")
        .filter_map(|arg| arg.child_by_field_name("operand"))
        .find(|owner| owner.kind() == "identifier")
        .map(|owner| text(owner, source));

    Some(Registration {
        router: text(operand, source),
        verb,
        path,
        handler_owner,
    })
}

/// Identifier returned by `return <ident>`
fn returned_identifier(statement: Node<'_>, source: &str) -> Option<String> {
    if statement.kind() != "return_statement" {
        return None;
    }
    let mut value = named_children(statement).into_iter().next()?;
    if value.kind() == "expression_list" {
        value = named_children(value).into_iter().next()?;
    }
    (value.kind() == "identifier").then(|| text(value, source))
}

fn receiver_name(function: Node<'_>, source: &str) -> Option<String> {
    let receiver = function.child_by_field_name("receiver")?;
    let declaration = named_children(receiver)
        .into_iter()
        .find(|n| n.kind() == "parameter_declaration")?;
    Some(text(declaration.child_by_field_name("name")?, source))
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn line_indent(source: &str, offset: usize) -> String {
    let prefix = &source[line_start(source, offset)..offset];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix.to_string()
    } else {
        "\t".to_string()
    }
}

/// Where new lines go relative to the `return` at `offset`
///
/// Before the blank line directly above the return when there is one;
/// otherwise right before the return, followed by a fresh blank line.
fn insertion_point(source: &str, offset: usize) -> (usize, bool) {
    let return_line = line_start(source, offset);
    if return_line == 0 {
        return (0, true);
    }
    let previous_end = return_line - 1;
    let previous_start = line_start(source, previous_end);
    if source[previous_start..previous_end].trim().is_empty() {
        (previous_start, false)
    } else {
        (return_line, true)
    }
}

/// Locate the registration region of a Go source file
///
/// # Errors
///
/// Fails only if the Go grammar cannot be loaded.
pub fn find_region(source: &str, go: &GoConfig) -> anyhow::Result<Option<RegistrationRegion>> {
    let tree = parse_go(source)?;
    Ok(region_in_tree(source, &tree, go))
}

fn function_name(function: Node<'_>, source: &str) -> Option<String> {
    function.child_by_field_name("name").map(|name| text(name, source))
}

/// Region spanning the first registration of `function` up to the next `return`
fn populated_region(function: Node<'_>, source: &str, go: &GoConfig) -> Option<RegistrationRegion> {
    let statements = body_statements(function.child_by_field_name("body")?);
    let (start, first) = statements
        .iter()
        .enumerate()
        .find_map(|(i, s)| registration(*s, source).map(|r| (i, r)))?;
    let end = start
        + 1
        + statements[start + 1..]
            .iter()
            .position(|s| s.kind() == "return_statement")?;

    let calls: Vec<Registration> = statements[start..end]
        .iter()
        .filter_map(|s| registration(*s, source))
        .filter(|r| r.router == first.router)
        .collect();
    let receiver = calls
        .iter()
        .find_map(|r| r.handler_owner.clone())
        .or_else(|| receiver_name(function, source))
        .unwrap_or_else(|| go.receiver.clone());
    let registered = calls
        .into_iter()
        .filter_map(|r| r.path.map(|path| (r.verb, path)))
        .collect();
    let (insert_at, needs_blank_line) = insertion_point(source, statements[end].start_byte());

    Some(RegistrationRegion {
        router: first.router,
        receiver,
        indent: line_indent(source, statements[start].start_byte()),
        registered,
        insert_at,
        needs_blank_line,
    })
}

/// Region of a registration function with no calls yet, ending in `return <ident>`
fn empty_region(function: Node<'_>, source: &str, go: &GoConfig) -> Option<RegistrationRegion> {
    let statements = body_statements(function.child_by_field_name("body")?);
    let last = statements.into_iter().rev().find(|s| s.kind() != "comment")?;
    let router = returned_identifier(last, source)?;
    let (insert_at, needs_blank_line) = insertion_point(source, last.start_byte());
    Some(RegistrationRegion {
        router,
        receiver: receiver_name(function, source).unwrap_or_else(|| go.receiver.clone()),
        indent: line_indent(source, last.start_byte()),
        registered: Vec::new(),
        insert_at,
        needs_blank_line,
    })
}

fn region_in_tree(source: &str, tree: &Tree, go: &GoConfig) -> Option<RegistrationRegion> {
    let functions: Vec<Node<'_>> = named_children(tree.root_node())
        .into_iter()
        .filter(|n| matches!(n.kind(), "function_declaration" | "method_declaration"))
        .collect();
    let (configured, others): (Vec<Node<'_>>, Vec<Node<'_>>) = functions
        .into_iter()
        .partition(|f| {
            function_name(*f, source).as_deref() == Some(go.registration_function.as_str())
        });

    configured
        .iter()
        .find_map(|f| populated_region(*f, source, go).or_else(|| empty_region(*f, source, go)))
        .or_else(|| others.iter().find_map(|f| populated_region(*f, source, go)))
}

fn route_label(endpoint: &Endpoint) -> String {
    format!("{} {}", endpoint.method, endpoint.path)
}

/// Merge registrations for `endpoints` into `source`
///
/// Paths already registered in the region are skipped. The method is not
/// part of the key: a path registered under any verb counts as present.
/// `subject` names the file in report notices.
///
/// # Errors
///
/// Fails if the grammar cannot be loaded, or if the merged source would
/// contain syntax errors the input did not.
pub fn merge_routes(
    source: &str,
    endpoints: &[Endpoint],
    go: &GoConfig,
    subject: &str,
) -> anyhow::Result<RouteMerge> {
    let tree = parse_go(source)?;
    let mut report = Report::new();

    let Some(region) = region_in_tree(source, &tree, go) else {
        report.push(Notice::new(
            Stage::Routes,
            Action::Warning,
            subject,
            "could not find route registration section; register routes manually",
        ));
        return Ok(RouteMerge {
            outcome: MergeOutcome::RegionNotFound,
            added: Vec::new(),
            report,
        });
    };
    tracing::debug!(
        router = %region.router,
        receiver = %region.receiver,
        existing = region.registered.len(),
        "Found route registration region"
    );

    let mut block = String::new();
    let mut added = Vec::new();
    for endpoint in endpoints {
        if let Some(method) = region.registered_method(&endpoint.path) {
            let message = if method == endpoint.method.as_str() {
                format!("already registered in {subject}")
            } else {
                format!(
                    "path already registered as {method} in {subject}; {} not added",
                    endpoint.method
                )
            };
            report.push(Notice::new(
                Stage::Routes,
                Action::Skipped,
                route_label(endpoint),
                message,
            ));
            continue;
        }
        let line = region.registration_line(endpoint);
        block.push_str(&region.indent);
        block.push_str(&line);
        block.push('\n');
        report.push(Notice::new(
            Stage::Routes,
            Action::Generated,
            route_label(endpoint),
            format!("registered in {subject}"),
        ));
        added.push(line);
    }

    if added.is_empty() {
        report.push(Notice::new(Stage::Routes, Action::Unchanged, subject, "no new routes"));
        return Ok(RouteMerge {
            outcome: MergeOutcome::Unchanged,
            added,
            report,
        });
    }
    if region.needs_blank_line {
        block.push('\n');
    }

    let mut merged = String::with_capacity(source.len() + block.len());
    merged.push_str(&source[..region.insert_at]);
    merged.push_str(&block);
    merged.push_str(&source[region.insert_at..]);

    if parse_go(&merged)?.root_node().has_error() && !tree.root_node().has_error() {
        bail!("Adding routes to {subject} would break its syntax; nothing was written");
    }

    report.push(Notice::new(
        Stage::Routes,
        Action::Updated,
        subject,
        format!("added {} route(s)", added.len()),
    ));
    Ok(RouteMerge {
        outcome: MergeOutcome::Updated(merged),
        added,
        report,
    })
}

/// Quote `value` as a Go interpreted string literal
pub fn go_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn unquote(literal: &str) -> String {
    if let Some(raw) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return raw.to_string();
    }
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
