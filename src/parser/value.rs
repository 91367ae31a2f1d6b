use once_cell::sync::Lazy;
use regex::Regex;

use super::*;

/// Separator for intlist payloads: commas and/or whitespace.
static LIST_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

pub(super) fn parse_payload(
    type_tag: &str,
    payload: &str,
    line: usize,
    column: usize,
) -> Result<Value, CtxError> {
    match type_tag {
        "real" => parse_real(payload, line, column),
        "text" => Ok(Value::Text(payload.to_string())),
        "intlist" => parse_intlist(payload, line, column),
        other => Err(CtxError::UnknownType {
            type_name: other.to_string(),
            line,
            column,
            hint: Some("Valid types are real, text, intlist, context".into()),
            code: Some(208),
        }),
    }
}

fn parse_real(payload: &str, line: usize, column: usize) -> Result<Value, CtxError> {
    payload
        .trim()
        .parse::<f64>()
        .map(Value::Real)
        .map_err(|_| CtxError::TypeError {
            message: format!("Invalid real payload '{}'", payload.trim()),
            line,
            column,
            hint: Some("Expected a decimal number".into()),
            code: Some(210),
        })
}

fn parse_intlist(payload: &str, line: usize, column: usize) -> Result<Value, CtxError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Ok(Value::IntList(Vec::new()));
    }

    let mut items = Vec::new();
    for piece in LIST_SEP.split(trimmed) {
        if piece.is_empty() {
            continue;
        }
        let n = piece.parse::<i32>().map_err(|_| CtxError::TypeError {
            message: format!("Invalid intlist entry '{}'", piece),
            line,
            column,
            hint: Some("Intlist entries are comma- or whitespace-separated integers".into()),
            code: Some(211),
        })?;
        items.push(n);
    }

    Ok(Value::IntList(items))
}
