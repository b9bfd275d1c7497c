use std::fmt::{self, Write};

use serde_json::Value;

use super::{RenderContext, Visited, literal, render_schema, resolve_or_write_ref};
use crate::parse::operation::{MediaType, RequestBody, is_truthy};

pub fn render_request_body(body: &Value, ctx: &RenderContext<'_>) -> String {
    if !is_truthy(body) {
        return "*No request body*\n\n".to_string();
    }

    let mut out = String::new();
    let _ = write_request_body(&mut out, body, ctx);
    out
}

fn write_request_body(out: &mut String, raw: &Value, ctx: &RenderContext<'_>) -> fmt::Result {
    let Some(value) = resolve_or_write_ref(out, raw, ctx)? else {
        return writeln!(out);
    };
    let body = RequestBody::from_value(value);

    writeln!(out, "**Required**: {}\n", body.required)?;
    if let Some(description) = body.description {
        writeln!(out, "**Description**: {}\n", literal(description))?;
    }
    if let Some(content) = &body.content {
        writeln!(out, "**Content Types**:\n")?;
        write_media_types(out, content, ctx)?;
    }
    Ok(())
}

/// One `- **`type`**:` bullet per content type, each followed by its schema
/// one level deeper and a blank line. Shared with the response formatter.
pub(crate) fn write_media_types(
    out: &mut String,
    content: &[MediaType<'_>],
    ctx: &RenderContext<'_>,
) -> fmt::Result {
    for media in content {
        writeln!(out, "- **`{}`**:", media.content_type)?;
        if let Some(schema) = media.schema {
            out.push_str(&render_schema(schema, ctx, 1, &Visited::new()));
        }
        writeln!(out)?;
    }
    Ok(())
}
