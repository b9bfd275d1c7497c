use std::borrow::Cow;
use std::fmt::{self, Write};

use serde_json::Value;

use super::{RenderContext, Visited, literal, render_schema, resolve_or_write_ref};
use crate::parse::operation::{Parameter, is_truthy};

/// Indentation depth of a parameter's schema, below its `- Schema:` bullet.
const SCHEMA_DEPTH: usize = 2;

/// Render an ordered parameter list. An empty list yields the
/// "no parameters" marker.
pub fn render_parameters(parameters: &[Value], ctx: &RenderContext<'_>) -> String {
    if parameters.is_empty() {
        return "*No parameters*\n\n".to_string();
    }

    let mut out = String::new();
    for raw in parameters {
        let _ = write_parameter(&mut out, raw, ctx);
    }
    out
}

fn write_parameter(out: &mut String, raw: &Value, ctx: &RenderContext<'_>) -> fmt::Result {
    let Some(value) = resolve_or_write_ref(out, raw, ctx)? else {
        return writeln!(out);
    };

    let param = Parameter::from_value(value);
    let unknown = Cow::Borrowed("unknown");
    let name = param.name.map(literal).unwrap_or_else(|| unknown.clone());
    let location = param.location.map(literal).unwrap_or(unknown);
    let required = if param.required {
        "**Required**"
    } else {
        "Optional"
    };

    writeln!(out, "- **`{name}`** ({location}) - {required}")?;
    if let Some(description) = param.description.filter(|d| is_truthy(d)) {
        writeln!(out, "  - Description: {}", literal(description))?;
    }
    if let Some(schema) = param.schema {
        writeln!(out, "  - Schema:")?;
        out.push_str(&render_schema(schema, ctx, SCHEMA_DEPTH, &Visited::new()));
    }
    writeln!(out)
}
