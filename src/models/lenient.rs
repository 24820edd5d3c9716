//! Forgiving deserializers for rows coming out of the MySQL-backed API.
//!
//! The backend is inconsistent: DECIMAL columns arrive as strings, JSON
//! columns arrive either decoded or still encoded, and timestamps use both
//! RFC 3339 and MySQL's `YYYY-MM-DD HH:MM:SS`. None of these should make a
//! whole listing fail to decode, so every adapter here degrades to `None`
//! or an empty value instead of erroring.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::services::json_decode::decode_or;

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from).filter(|n| n.is_finite()))
}

pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = opt_f64(deserializer)?;
    Ok(value.filter(|n| *n >= 0.0).map(|n| n.round() as u32))
}

pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = opt_f64(deserializer)?;
    Ok(value.filter(|n| *n >= 0.0).map(|n| n.round() as u64))
}

/// Counts default to zero rather than `None`.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u32(deserializer)?.unwrap_or(0))
}

/// Ids are numeric in MySQL but sometimes stringified by the API layer.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_datetime(&s),
        _ => None,
    })
}

/// A JSON column that may still be an encoded string; bad input becomes `T::default()`.
pub fn json_column<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(value) => decode_or(&value, T::default()),
        None => T::default(),
    })
}

/// Like [`json_column`] but keeps the raw JSON shape.
pub fn json_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(value) => decode_or(&value, Value::Null),
        None => Value::Null,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "count")]
        rating_count: u32,
        #[serde(default, deserialize_with = "opt_datetime")]
        created_at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "json_column")]
        amenities: Vec<String>,
        #[serde(default, deserialize_with = "id_string")]
        id: String,
    }

    #[test]
    fn test_decimal_strings_and_encoded_json() {
        let row: Row = serde_json::from_str(
            r#"{"id": 42, "price": "1250000.00", "rating_count": "7",
                "created_at": "2024-03-05 08:30:00",
                "amenities": "[\"wifi\",\"pool\"]"}"#,
        )
        .unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.price, Some(1_250_000.0));
        assert_eq!(row.rating_count, 7);
        let created = row.created_at.unwrap();
        assert_eq!((created.year(), created.month(), created.hour()), (2024, 3, 8));
        assert_eq!(row.amenities, vec!["wifi", "pool"]);
    }

    #[test]
    fn test_garbage_degrades_instead_of_failing() {
        let row: Row = serde_json::from_str(
            r#"{"price": "n/a", "rating_count": null, "created_at": "yesterday",
                "amenities": "{bad"}"#,
        )
        .unwrap();
        assert_eq!(row.price, None);
        assert_eq!(row.rating_count, 0);
        assert_eq!(row.created_at, None);
        assert!(row.amenities.is_empty());
        assert_eq!(row.id, "");
    }

    #[test]
    fn test_rfc3339_timestamps() {
        let parsed = parse_datetime("2024-05-01T10:00:00.000Z").unwrap();
        assert_eq!(parsed.month(), 5);
    }
}
