use std::fmt::{self, Write};

use serde_json::Value;

use super::parameters::render_parameters;
use super::request_body::render_request_body;
use super::responses::render_responses;
use super::{RenderContext, code_list, literal};
use crate::parse::operation::{HttpMethod, Operation, is_truthy};

/// Render the full markdown block for one `(path, method)` operation.
///
/// Sections appear in a fixed order: heading, summary, description,
/// operation id, tags, then parameters, request body, responses and
/// security. A section is omitted when its key is absent from the
/// operation; a present but empty `parameters` list still renders the
/// "no parameters" marker.
pub fn render_endpoint(
    path: &str,
    method: HttpMethod,
    operation: &Operation<'_>,
    ctx: &RenderContext<'_>,
) -> String {
    let mut out = String::new();
    let _ = write_endpoint(&mut out, path, method, operation, ctx);
    out
}

fn write_endpoint(
    out: &mut String,
    path: &str,
    method: HttpMethod,
    operation: &Operation<'_>,
    ctx: &RenderContext<'_>,
) -> fmt::Result {
    writeln!(out, "## `{method} {path}`\n")?;

    if operation.deprecated() {
        writeln!(out, "> **Deprecated**\n")?;
    }
    if let Some(summary) = operation.summary() {
        writeln!(out, "**Summary**: {}\n", literal(summary))?;
    }
    if let Some(description) = operation.description() {
        writeln!(out, "**Description**: {}\n", literal(description))?;
    }
    if let Some(operation_id) = operation.operation_id() {
        writeln!(out, "**Operation ID**: `{}`\n", literal(operation_id))?;
    }
    if let Some(tags) = operation.tags() {
        writeln!(out, "**Tags**: {}\n", code_list(tags))?;
    }

    writeln!(out, "---\n")?;

    if let Some(parameters) = operation.parameters() {
        writeln!(out, "### Parameters\n")?;
        out.push_str(&render_parameters(parameters, ctx));
    }
    if let Some(body) = operation.request_body() {
        writeln!(out, "### Request Body\n")?;
        out.push_str(&render_request_body(body, ctx));
    }
    if let Some(responses) = operation.responses() {
        writeln!(out, "### Responses\n")?;
        out.push_str(&render_responses(responses, ctx));
    }
    if let Some(security) = operation.security() {
        write_security(out, security)?;
    }

    writeln!(out, "\n---\n")
}

fn write_security(out: &mut String, security: &Value) -> fmt::Result {
    writeln!(out, "### Security\n")?;
    let requirements = security.as_array().map(Vec::as_slice).unwrap_or_default();
    for requirement in requirements.iter().filter_map(Value::as_object) {
        for (scheme, scopes) in requirement {
            writeln!(out, "- **{scheme}**: {}", scopes_text(scopes))?;
        }
    }
    writeln!(out)
}

fn scopes_text(scopes: &Value) -> String {
    if !is_truthy(scopes) {
        return "No scopes required".to_string();
    }
    match scopes.as_array() {
        Some(scopes) => code_list(scopes),
        None => literal(scopes).into_owned(),
    }
}
