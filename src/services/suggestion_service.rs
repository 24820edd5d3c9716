use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::http::api_client::{ApiClient, QueryParams};
use crate::models::domain::DomainSpec;
use crate::models::suggestion::{SuggestionItem, SuggestionKind};

/// Field name that routes a suggestion request to the entity-name endpoint.
pub const NAME_FIELD: &str = "name";

/// Autocomplete for one listing's search boxes.
///
/// Failures never surface: a broken suggest endpoint just means an empty
/// dropdown. Callers are expected to gate on [`min_chars`](Self::min_chars)
/// and debounce keystrokes before calling [`suggest`](Self::suggest).
pub struct SuggestionFetcher {
    client: Arc<dyn ApiClient>,
    spec: &'static DomainSpec,
    /// Allowed values per field, filled once the opposite field is chosen.
    narrowed: HashMap<&'static str, Vec<String>>,
}

impl SuggestionFetcher {
    pub fn new(client: Arc<dyn ApiClient>, spec: &'static DomainSpec) -> Self {
        Self {
            client,
            spec,
            narrowed: HashMap::new(),
        }
    }

    pub fn min_chars(&self) -> usize {
        self.spec.suggest.as_ref().map_or(usize::MAX, |s| s.min_chars)
    }

    /// Whether `text` is long enough to be worth a request.
    pub fn accepts(&self, text: &str) -> bool {
        let length = text.trim().chars().count();
        length > 0 && length >= self.min_chars()
    }

    pub async fn suggest(&self, partial_text: &str, field: &str) -> Vec<SuggestionItem> {
        let Some(suggest) = self.spec.suggest.as_ref() else {
            return Vec::new();
        };

        let (path, default_kind) = match (field, suggest.names_path) {
            (NAME_FIELD, Some(names_path)) => (names_path, name_kind(self.spec)),
            _ => (suggest.path, SuggestionKind::Location),
        };

        let mut params = QueryParams::new().with("q", partial_text.trim());
        if let Some(direction) = field.strip_suffix("_location") {
            params.push("type", direction);
        }

        let body = match self.client.get_json(path, &params).await {
            Ok(body) => body,
            Err(err) => {
                warn!("Suggestions from {} unavailable: {}", path, err);
                return Vec::new();
            }
        };

        let mut items: Vec<SuggestionItem> = suggestion_rows(&body)
            .iter()
            .filter_map(|row| SuggestionItem::from_json(row, default_kind))
            .collect();

        if let Some(allowed) = self.narrowed.get(field).filter(|a| !a.is_empty()) {
            items.retain(|item| {
                allowed
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == item.value.to_lowercase())
            });
        }
        debug!("{} suggestions for '{}'", items.len(), partial_text);
        items
    }

    /// Records a picked location and pre-fetches what the opposite field may hold.
    ///
    /// Returns how many counterpart values were cached. A failed fetch clears
    /// the narrowing so the opposite field falls back to plain suggestions.
    pub async fn select_location(&mut self, field: &str, value: &str) -> usize {
        let Some(narrowing) = self.spec.narrowing.iter().find(|n| n.field == field) else {
            return 0;
        };
        if value.trim().is_empty() {
            self.narrowed.remove(narrowing.opposite);
            return 0;
        }

        let params = QueryParams::new().with(narrowing.param, value.trim());
        match self.client.get_json(narrowing.path, &params).await {
            Ok(body) => {
                let values: Vec<String> = suggestion_rows(&body)
                    .iter()
                    .filter_map(|row| SuggestionItem::from_json(row, SuggestionKind::Location))
                    .map(|item| item.value)
                    .collect();
                let count = values.len();
                self.narrowed.insert(narrowing.opposite, values);
                count
            }
            Err(err) => {
                warn!("Could not narrow {} from {}: {}", narrowing.opposite, value, err);
                self.narrowed.remove(narrowing.opposite);
                0
            }
        }
    }

    pub fn narrowed_values(&self, field: &str) -> Option<&[String]> {
        self.narrowed.get(field).map(Vec::as_slice)
    }
}

fn name_kind(spec: &DomainSpec) -> SuggestionKind {
    match spec.domain {
        crate::models::domain::Domain::Hotels => SuggestionKind::Hotel,
        crate::models::domain::Domain::Destinations => SuggestionKind::Destination,
        _ => SuggestionKind::Tour,
    }
}

fn suggestion_rows(body: &Value) -> &[Value] {
    let rows = match body {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => ["suggestions", "locations", "data"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    };
    rows.map(Vec::as_slice).unwrap_or(&[])
}
