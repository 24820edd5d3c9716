use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use log::warn;
use serde_json::Value;

use crate::http::api_client::{ApiClient, QueryParams};
use crate::models::domain::DomainSpec;

/// Option lists for a listing's sidebar, keyed by `OptionSource::key`.
pub type FilterOptions = BTreeMap<&'static str, Vec<String>>;

/// Fetches every option list of a listing at once. A list that fails to load
/// comes back empty; the others are unaffected.
pub async fn load_filter_options(client: Arc<dyn ApiClient>, spec: &'static DomainSpec) -> FilterOptions {
    let fetches = spec.options.iter().map(|source| {
        let client = client.clone();
        async move {
            let values = match client.get_json(source.path, &QueryParams::new()).await {
                Ok(body) => option_values(&body),
                Err(err) => {
                    warn!("Option list {} unavailable: {}", source.path, err);
                    Vec::new()
                }
            };
            (source.key, values)
        }
    });
    join_all(fetches).await.into_iter().collect()
}

/// Strings out of `[..]`, `{data: [..]}` or `{<anything>: [..]}`. Object rows
/// contribute their `value`, `name` or first string field.
pub fn option_values(body: &Value) -> Vec<String> {
    let rows = match body {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => map
            .get("data")
            .and_then(Value::as_array)
            .or_else(|| map.values().find_map(Value::as_array)),
        _ => None,
    };

    let mut seen = HashSet::new();
    rows
        .into_iter()
        .flatten()
        .filter_map(|row| match row {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map
                .get("value")
                .or_else(|| map.get("name"))
                .and_then(Value::as_str)
                .or_else(|| map.values().find_map(Value::as_str))
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
