// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use serde_json::json;

use crate::context::Context;
use crate::utils::{escape_attr, escape_text};
use crate::value::Value;
use crate::CtxError;

const INDENT: &str = "  ";

/// Serialize a context tree to the canonical XML document.
///
/// Layout:
/// - one XML declaration line,
/// - every context node becomes a `<context path="...">` element
///   (self-closing when it holds nothing),
/// - every variable becomes a `<var name="..." type="...">` leaf; reals use
///   the shortest round-trip form, intlists are comma-separated,
/// - context-valued variables wrap a nested `<context>` element.
///
/// # Examples
/// ```no_run
/// use ctxtree::{Context, export};
///
/// let mut ctx = Context::new();
/// ctx.set_path("params");
/// ctx.add("dt", 0.1);
/// let xml = export::context_to_xml(&ctx);
/// ```
pub fn context_to_xml(ctx: &Context) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_context(&mut out, ctx, 0);
    out
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_context(out: &mut String, ctx: &Context, depth: usize) {
    push_indent(out, depth);

    if ctx.is_empty() && ctx.children().is_empty() {
        out.push_str(&format!("<context path=\"{}\"/>\n", escape_attr(ctx.get_path())));
        return;
    }

    out.push_str(&format!("<context path=\"{}\">\n", escape_attr(ctx.get_path())));
    for (name, value) in ctx.variables() {
        write_var(out, name, value, depth + 1);
    }
    for child in ctx.children() {
        write_context(out, child, depth + 1);
    }
    push_indent(out, depth);
    out.push_str("</context>\n");
}

fn write_var(out: &mut String, name: &str, value: &Value, depth: usize) {
    push_indent(out, depth);

    match value {
        Value::Real(x) => {
            out.push_str(&format!(
                "<var name=\"{}\" type=\"real\">{}</var>\n",
                escape_attr(name),
                x
            ));
        }
        Value::Text(s) => {
            out.push_str(&format!(
                "<var name=\"{}\" type=\"text\">{}</var>\n",
                escape_attr(name),
                escape_text(s)
            ));
        }
        Value::IntList(items) => {
            let rendered = items
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "<var name=\"{}\" type=\"intlist\">{}</var>\n",
                escape_attr(name),
                rendered
            ));
        }
        Value::Sub(sub) => {
            out.push_str(&format!("<var name=\"{}\" type=\"context\">\n", escape_attr(name)));
            write_context(out, sub, depth + 1);
            push_indent(out, depth);
            out.push_str("</var>\n");
        }
    }
}

/// Export a context tree to JSON format.
///
/// Converts all values to their JSON equivalents:
/// - Real → number
/// - Text → string
/// - IntList → array of numbers
/// - Sub / child contexts → nested objects with `path`, `variables` and
///   `children` keys
///
/// One-way: there is no JSON import, the native format is XML.
pub fn context_to_json(ctx: &Context) -> String {
    fn value_to_json(v: &Value) -> serde_json::Value {
        match v {
            Value::Real(x) => json!(x),
            Value::Text(s) => json!(s),
            Value::IntList(items) => json!(items),
            Value::Sub(sub) => context_json(sub),
        }
    }

    fn context_json(ctx: &Context) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("path".into(), json!(ctx.get_path()));

        let vars = ctx
            .variables()
            .map(|(k, v)| (k.to_string(), value_to_json(v)))
            .collect::<serde_json::Map<_, _>>();
        obj.insert("variables".into(), serde_json::Value::Object(vars));

        let children = ctx.children().iter().map(context_json).collect::<Vec<_>>();
        if !children.is_empty() {
            obj.insert("children".into(), serde_json::Value::Array(children));
        }

        serde_json::Value::Object(obj)
    }

    serde_json::to_string_pretty(&context_json(ctx)).unwrap()
}

/// Export a context XML file directly to JSON.
///
/// Convenience function that reads, parses, and exports in one call.
///
/// # Errors
/// Returns error if the file doesn't exist or contains a malformed document.
pub fn export_json_file(path: &str) -> Result<String, CtxError> {
    let input = fs::read_to_string(path)
        .map_err(|e| CtxError::file_error(format!("Failed to read file: {}", e), path.to_string()))?;

    let ctx = Context::from_str(&input)?;
    Ok(context_to_json(&ctx))
}
