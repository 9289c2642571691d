use serde_json::{Map, Value};

/// One row of a backend collection, exactly as the server returned it.
///
/// Records are transient: built fresh on every fetch, never mutated in
/// place, discarded on the next fetch. The backend is the sole source of
/// truth between renders.
pub type Record = Map<String, Value>;

/// Server-assigned identifier of a record.
pub fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

/// Text form of a field value for tabular display.
///
/// Strings render bare (no surrounding quotes), everything else through its
/// JSON text, so a price of `4.5` shows as `4.5` and a boolean as `true`.
pub fn display_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
