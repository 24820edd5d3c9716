use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a loosely-typed JSON field into `T`, falling back on any failure.
///
/// The backend returns JSON columns either already decoded (array/object) or
/// still encoded as a string. Both shapes are accepted; a string that is not
/// valid JSON, or JSON of the wrong shape, yields `fallback`.
pub fn decode_or<T: DeserializeOwned>(value: &Value, fallback: T) -> T {
    let decoded = match value {
        Value::Null => return fallback,
        Value::String(raw) => parse_str::<T>(raw),
        other => serde_json::from_value::<T>(other.clone()).ok(),
    };
    decoded.unwrap_or(fallback)
}

/// String-only variant of [`decode_or`].
pub fn parse_or<T: DeserializeOwned>(raw: &str, fallback: T) -> T {
    parse_str(raw).unwrap_or(fallback)
}

fn parse_str<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<T>(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Falling back on undecodable JSON field: {}", e);
            None
        }
    }
}
