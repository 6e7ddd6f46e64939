//! Fill gaps in a stored document from an explicit defaults document.

use serde_json::{Map, Value};

use sitecms_common::ConfigDocument;

use crate::error::{EditorError, Result};

/// Field-by-field substitution, not a deep merge.
///
/// Every top-level field of `defaults` is taken from `raw` when present and
/// non-null, verbatim, so explicit `false`, `0`, `""` and `[]` survive. A
/// missing or `null` field falls back to the default. Fields `defaults` does
/// not have are dropped.
pub fn normalize<D: ConfigDocument>(raw: &Value, defaults: &D) -> Result<D> {
    let Value::Object(raw_fields) = raw else {
        return Err(EditorError::Parse(format!(
            "{} document must be a JSON object",
            D::KIND
        )));
    };
    let Value::Object(default_fields) = serde_json::to_value(defaults)? else {
        return Err(EditorError::Parse(format!(
            "{} defaults did not serialize to an object",
            D::KIND
        )));
    };

    let mut merged = Map::with_capacity(default_fields.len());
    for (field, default_value) in default_fields {
        let value = match raw_fields.get(&field) {
            Some(v) if !v.is_null() => v.clone(),
            _ => default_value,
        };
        merged.insert(field, value);
    }

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| EditorError::Parse(format!("{} document: {e}", D::KIND)))
}
