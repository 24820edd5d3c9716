use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;
use url::Url;

use crate::error::SearchError;
use crate::http::api_client::{ApiClient, QueryParams};
use crate::models::criteria::FilterValue;
use crate::models::domain::{DomainSpec, FilterScope, PaginationMode};
use crate::models::listing::ListingItem;
use crate::models::pagination::ServerPagination;
use crate::services::filter_state::FilterStateStore;

/// Raw page of rows as fetched, before client-side refinement.
#[derive(Debug, Clone)]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    /// `None` when the endpoint returned a bare list.
    pub pagination: Option<ServerPagination>,
}

/// Serialises filter state and calls a listing endpoint.
pub struct QueryExecutor {
    client: Arc<dyn ApiClient>,
    spec: &'static DomainSpec,
    host: Url,
}

impl QueryExecutor {
    pub fn new(client: Arc<dyn ApiClient>, spec: &'static DomainSpec, host: Url) -> Self {
        Self { client, spec, host }
    }

    /// Query parameters for the current state.
    ///
    /// Deterministic: same state, same parameters, same order. `All` fields
    /// are dropped, `Unset` fields contribute their declared default, client
    /// scoped fields never leave the process.
    pub fn build_params(store: &FilterStateStore) -> QueryParams {
        let spec = store.spec();
        let mut params = QueryParams::new();

        for field in spec.fields.iter().filter(|f| f.scope == FilterScope::Server) {
            let value = match store.criteria().get(field.name) {
                FilterValue::Unset => field.default.map(str::to_string),
                other => other.to_param(),
            };
            if let Some(value) = value {
                params.push(field.name, value);
            }
        }

        for location_field in spec.location_fields {
            if let Some(value) = store.search().location(location_field) {
                params.push(*location_field, value);
            }
        }

        if spec.text_scope == FilterScope::Server {
            if let Some(text) = store.search().trimmed_text() {
                params.push(spec.text_param, text);
            }
        }

        if let Some(sort) = store.sort() {
            params.push("sort", sort.as_str());
        }

        if spec.pagination == PaginationMode::Server {
            params.push("page", store.page().to_string());
            params.push("limit", store.limit().to_string());
        }

        params
    }

    pub async fn execute<T: ListingItem>(
        &self,
        params: &QueryParams,
    ) -> Result<ListingPage<T>, SearchError> {
        let body = match self.client.get_json(self.spec.path, params).await {
            Ok(body) => body,
            Err(err) => match self.spec.fallback_path {
                Some(fallback) => {
                    warn!(
                        "{} failed ({}), retrying against {}",
                        self.spec.path, err, fallback
                    );
                    self.client.get_json(fallback, params).await?
                }
                None => return Err(err.into()),
            },
        };

        let mut page = decode_listing::<T>(&body, self.spec.items_key);
        for item in page.items.iter_mut() {
            item.normalize_images(&self.host);
        }
        debug!(
            "{} returned {} rows",
            self.spec.domain.as_str(),
            page.items.len()
        );
        Ok(page)
    }
}

/// Pulls rows out of `{<items_key>: [...], pagination}`, `{data: [...]}` or a
/// bare array. Rows that fail to decode are skipped, not fatal.
pub fn decode_listing<T: ListingItem>(body: &Value, items_key: &str) -> ListingPage<T> {
    let rows = match body {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => map
            .get(items_key)
            .or_else(|| map.get("data"))
            .and_then(Value::as_array),
        _ => None,
    };

    let items = rows
        .map(|rows| {
            rows.iter()
                .filter_map(|row| match serde_json::from_value::<T>(row.clone()) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!("Skipping undecodable {} row: {}", items_key, e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let pagination = body
        .get("pagination")
        .and_then(|p| serde_json::from_value::<ServerPagination>(p.clone()).ok());

    ListingPage { items, pagination }
}
