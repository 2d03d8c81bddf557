//! Observation series extraction and cleaning

use serde_json::Value;

/// Pull the observation column out of a column-oriented JSON body and
/// coerce it to numbers.
///
/// Entries that cannot be coerced are treated as missing and dropped;
/// the relative order of the surviving values is preserved.
pub fn extract(body: &Value, field: &str) -> Result<Vec<f64>, String> {
    let column = body
        .get(field)
        .ok_or_else(|| format!("missing field '{}' in request body", field))?;
    let rows = column
        .as_array()
        .ok_or_else(|| format!("field '{}' must be an array", field))?;

    let values: Vec<f64> = rows.iter().filter_map(coerce_numeric).collect();
    if values.is_empty() {
        return Err(format!("field '{}' contains no numeric values", field));
    }
    Ok(values)
}

/// JSON numbers pass through, numeric strings are parsed, and anything
/// non-finite or non-numeric is missing.
fn coerce_numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
