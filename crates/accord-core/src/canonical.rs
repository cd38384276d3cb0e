//! Canonical JSON encoding.
//!
//! The digest protocol depends on every node producing byte-identical JSON
//! for equal values, so the encoding is fixed here rather than left to
//! serializer defaults: object keys sorted lexicographically by their UTF-8
//! bytes, no whitespace, serde_json string escaping and number formatting.

use crate::errors::{ProtocolError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Serialize a value to its canonical JSON string.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    let mut out = String::new();
    write_value(&mut out, &value)?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            let escaped = serde_json::to_string(s)
                .map_err(|e| ProtocolError::serialization(e.to_string()))?;
            out.push_str(&escaped);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            // BTreeMap gives the sorted key order regardless of how the
            // serde_json Value was built.
            let sorted: BTreeMap<&String, &Value> = map.iter().collect();
            out.push('{');
            for (i, (key, item)) in sorted.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let escaped = serde_json::to_string(key)
                    .map_err(|e| ProtocolError::serialization(e.to_string()))?;
                out.push_str(&escaped);
                out.push(':');
                write_value(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}
