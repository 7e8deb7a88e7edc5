//! Display formatting for tool parameter schemas
//!
//! Backends publish schemas in three shapes: native JSON objects, strict JSON
//! text, and the `repr()` of a Python dict. Everything here is best-effort and
//! for display only; nothing produced by this module is ever sent back to a
//! backend.

use crate::types::SchemaValue;
use serde_json::Value;

/// Shown when a tool publishes no schema
pub const NO_SCHEMA: &str = "No schema available";

/// Shown when formatting fails unexpectedly
pub const SCHEMA_FORMAT_ERROR: &str = "Error formatting schema";

/// Format a tool schema as pretty-printed JSON text (2-space indent)
///
/// Text that cannot be decoded is returned trimmed and otherwise untouched.
pub fn format_schema(schema: Option<&SchemaValue>) -> String {
    let schema = match schema {
        Some(s) if !s.is_empty() => s,
        _ => return NO_SCHEMA.to_string(),
    };

    match schema {
        SchemaValue::Structured(value) => match pretty(value) {
            Some(text) => text,
            None => SCHEMA_FORMAT_ERROR.to_string(),
        },
        SchemaValue::Text(text) => format_text_schema(text),
    }
}

fn format_text_schema(text: &str) -> String {
    let decoded = if looks_like_dict_literal(text) {
        let decoded = decode_legacy_dict_literal(text);
        if decoded.is_none() {
            tracing::debug!("schema looked like a dict literal but did not decode");
        }
        decoded
    } else {
        serde_json::from_str::<Value>(text).ok()
    };

    match decoded {
        Some(value) => pretty(&value).unwrap_or_else(|| SCHEMA_FORMAT_ERROR.to_string()),
        None => text.trim().to_string(),
    }
}

// Floats keep serde_json's notation: `1.0` stays `1.0` and `1e2` becomes
// `100.0`, where a browser would print `1` and `100`.
fn pretty(value: &Value) -> Option<String> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => Some(text.trim().to_string()),
        Err(e) => {
            tracing::error!("Error formatting schema for display: {}", e);
            None
        }
    }
}

/// Heuristic: a Python dict `repr()` of a JSON schema
pub fn looks_like_dict_literal(text: &str) -> bool {
    text.starts_with('{') && text.contains("'properties'")
}

/// Best-effort legacy text decode of a Python dict literal into JSON.
///
/// Replaces every `'` with `"` and the tokens `None`/`True`/`False` with
/// `null`/`true`/`false`, then parses the result as JSON. The substitution is
/// lossy: an apostrophe inside a string value corrupts the text, and the
/// tokens are replaced wherever they occur, including inside strings. Only use
/// the result for display.
pub fn decode_legacy_dict_literal(text: &str) -> Option<Value> {
    let translated = text
        .replace('\'', "\"")
        .replace("None", "null")
        .replace("True", "true")
        .replace("False", "false");
    serde_json::from_str(&translated).ok()
}
