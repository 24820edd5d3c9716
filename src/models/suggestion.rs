use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Location,
    Hotel,
    Tour,
    Destination,
    #[serde(other)]
    Other,
}

/// One autocomplete candidate; `kind` tells the UI which field a pick writes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub value: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SuggestionItem {
    pub fn location(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind: SuggestionKind::Location,
            display: value.clone(),
            value,
            location: None,
        }
    }

    /// Accepts the shapes the suggest endpoints actually return: full objects,
    /// objects with only `name`/`value`, or bare strings.
    pub fn from_json(value: &Value, default_kind: SuggestionKind) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self {
                kind: default_kind,
                value: s.trim().to_string(),
                display: s.trim().to_string(),
                location: None,
            }),
            Value::Object(map) => {
                let text = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                let value = text("value")
                    .or_else(|| text("name"))
                    .or_else(|| text("location"))?;
                let kind = map
                    .get("type")
                    .cloned()
                    .and_then(|k| serde_json::from_value(k).ok())
                    .unwrap_or(default_kind);
                Some(Self {
                    kind,
                    display: text("display").unwrap_or_else(|| value.clone()),
                    location: text("location").filter(|l| *l != value),
                    value,
                })
            }
            _ => None,
        }
    }
}
