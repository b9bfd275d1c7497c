use std::fmt::{self, Write};

use serde_json::Value;

use super::{RenderContext, Visited, code_list, indent, literal};
use crate::parse::ref_resolve::resolve;
use crate::parse::schema::{Composition, Schema, SchemaNode};

/// Render a schema value (or a `$ref` to one) as an indented markdown bullet
/// list starting at `depth`.
///
/// `visited` holds the references already entered on the path to this node.
/// Whether resolved references are expanded is controlled by
/// `ctx.options.inline_refs`, which reaches every recursive call.
pub fn render_schema(
    node: &Value,
    ctx: &RenderContext<'_>,
    depth: usize,
    visited: &Visited<'_>,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_schema(&mut out, node, ctx, depth, visited);
    out
}

fn write_schema(
    out: &mut String,
    node: &Value,
    ctx: &RenderContext<'_>,
    depth: usize,
    visited: &Visited<'_>,
) -> fmt::Result {
    let pad = indent(depth);

    if depth > ctx.options.max_depth {
        log::warn!(
            "schema nesting exceeds {} levels, truncating output",
            ctx.options.max_depth
        );
        return writeln!(
            out,
            "{pad}- *(maximum nesting depth of {} reached, output truncated)*",
            ctx.options.max_depth
        );
    }

    match SchemaNode::classify(node) {
        SchemaNode::Literal(value) => writeln!(out, "{pad}- `{}`", literal(value)),
        SchemaNode::Ref(ref_path) => write_ref(out, &ref_path, ctx, depth, visited),
        SchemaNode::Schema(schema) => write_facets(out, &schema, ctx, depth, visited),
    }
}

fn write_ref(
    out: &mut String,
    ref_path: &str,
    ctx: &RenderContext<'_>,
    depth: usize,
    visited: &Visited<'_>,
) -> fmt::Result {
    let pad = indent(depth);
    writeln!(out, "{pad}- **$ref**: `{ref_path}`")?;

    if visited.contains(ref_path) {
        return writeln!(out, "{pad}  *(circular reference, see definition above)*");
    }
    if !ctx.options.inline_refs {
        return Ok(());
    }
    if out.len() >= ctx.options.max_schema_bytes {
        log::debug!(
            "schema output exceeds {} bytes, not expanding {ref_path}",
            ctx.options.max_schema_bytes
        );
        return writeln!(out, "{pad}  *(output size limit reached, definition not expanded)*");
    }

    let branch = visited.with(ref_path);
    match resolve(ref_path, ctx.root()) {
        Ok(target) => {
            writeln!(out, "{pad}  **Resolved Definition**:")?;
            write_schema(out, target, ctx, depth + 1, &branch)
        }
        Err(err) => {
            log::debug!("{err}");
            writeln!(out, "{pad}  *(unable to resolve reference)*")
        }
    }
}

/// Facets are emitted in a fixed order. Every nested call receives the same
/// `visited` chain this node was given.
fn write_facets(
    out: &mut String,
    schema: &Schema<'_>,
    ctx: &RenderContext<'_>,
    depth: usize,
    visited: &Visited<'_>,
) -> fmt::Result {
    let pad = indent(depth);

    if let Some(schema_type) = schema.schema_type {
        writeln!(out, "{pad}- **Type**: `{}`", type_text(schema_type))?;
    }
    if let Some(description) = schema.description {
        writeln!(out, "{pad}- **Description**: {}", literal(description))?;
    }
    if let Some(title) = schema.title {
        writeln!(out, "{pad}- **Title**: {}", literal(title))?;
    }
    if let Some(values) = schema.enum_values {
        writeln!(out, "{pad}- **Enum**: {}", list_text(values))?;
    }
    if let Some(default) = schema.default_value {
        writeln!(out, "{pad}- **Default**: `{}`", literal(default))?;
    }
    if let Some(format) = schema.format {
        writeln!(out, "{pad}- **Format**: `{}`", literal(format))?;
    }

    if let Some(properties) = schema.properties {
        writeln!(out, "{pad}- **Properties**:")?;
        for (name, property) in properties {
            let marker = if schema.is_required(name) {
                " *(required)*"
            } else {
                ""
            };
            writeln!(out, "{pad}  - **`{name}`**{marker}:")?;
            write_schema(out, property, ctx, depth + 2, visited)?;
        }
    }

    if let Some(items) = schema.items {
        writeln!(out, "{pad}- **Items**:")?;
        write_schema(out, items, ctx, depth + 1, visited)?;
    }

    for kind in Composition::ALL {
        let Some(options) = schema.composition(kind) else {
            continue;
        };
        writeln!(out, "{pad}- **{}**:", kind.keyword())?;
        for (i, option) in options.iter().enumerate() {
            writeln!(out, "{pad}  - Option {}:", i + 1)?;
            write_schema(out, option, ctx, depth + 2, visited)?;
        }
    }

    if let Some(additional) = schema.additional_properties {
        writeln!(out, "{pad}- **Additional Properties**:")?;
        write_schema(out, additional, ctx, depth + 1, visited)?;
    }

    // Object required lists already show up as per-property markers.
    if let Some(required) = schema.required
        && !schema.is_object_type()
    {
        writeln!(out, "{pad}- **Required**: {}", list_text(required))?;
    }

    if let Some(example) = schema.example {
        writeln!(out, "{pad}- **Example**: `{}`", literal(example))?;
    }
    if let Some(pattern) = schema.pattern {
        writeln!(out, "{pad}- **Pattern**: `{}`", literal(pattern))?;
    }
    for (keyword, value) in &schema.bounds {
        writeln!(out, "{pad}- **{keyword}**: `{}`", literal(value))?;
    }

    Ok(())
}

/// `type` may be a single name or a list of names (`["string", "null"]`).
fn type_text(value: &Value) -> String {
    match value {
        Value::Array(types) => types
            .iter()
            .map(|t| literal(t).into_owned())
            .collect::<Vec<_>>()
            .join(" | "),
        other => literal(other).into_owned(),
    }
}

fn list_text(value: &Value) -> String {
    match value.as_array() {
        Some(values) => code_list(values),
        None => format!("`{}`", literal(value)),
    }
}
