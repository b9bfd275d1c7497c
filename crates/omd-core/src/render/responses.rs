use std::fmt::{self, Write};

use serde_json::Value;

use super::request_body::write_media_types;
use super::{RenderContext, literal, resolve_or_write_ref};
use crate::parse::operation::Response;

/// Render every status code in the order the document lists them.
pub fn render_responses(responses: &Value, ctx: &RenderContext<'_>) -> String {
    let Some(responses) = responses.as_object().filter(|r| !r.is_empty()) else {
        return "*No responses defined*\n\n".to_string();
    };

    let mut out = String::new();
    for (status, raw) in responses {
        let _ = write_response(&mut out, status, raw, ctx);
    }
    out
}

fn write_response(
    out: &mut String,
    status: &str,
    raw: &Value,
    ctx: &RenderContext<'_>,
) -> fmt::Result {
    writeln!(out, "### Response: `{status}`\n")?;

    match resolve_or_write_ref(out, raw, ctx)? {
        Some(value) => {
            let response = Response::from_value(value);
            if let Some(description) = response.description {
                writeln!(out, "**Description**: {}\n", literal(description))?;
            }
            if let Some(content) = &response.content {
                writeln!(out, "**Content**:\n")?;
                write_media_types(out, content, ctx)?;
            }
        }
        None => writeln!(out)?,
    }

    writeln!(out, "---\n")
}
