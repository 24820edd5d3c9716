use crate::error::SearchError;
use crate::http::api_client::QueryParams;
use crate::models::criteria::{FilterCriteria, FilterValue};
use crate::models::domain::{DomainSpec, FieldKind};
use crate::models::search::{SearchQuery, SortSpec};

/// Filter, search, sort and page state for one listing page.
///
/// Every mutation except [`set_page`](Self::set_page) and raw keystrokes
/// sends the user back to page 1, since the old page number means nothing
/// against a different result set.
#[derive(Debug, Clone)]
pub struct FilterStateStore {
    spec: &'static DomainSpec,
    criteria: FilterCriteria,
    search: SearchQuery,
    sort: Option<SortSpec>,
    page: u32,
    limit: u32,
}

impl FilterStateStore {
    /// Fresh store; every field starts `Unset` until hydrated or touched.
    pub fn new(spec: &'static DomainSpec) -> Self {
        Self {
            spec,
            criteria: FilterCriteria::new(),
            search: SearchQuery::default(),
            sort: spec.default_sort,
            page: 1,
            limit: spec.default_limit,
        }
    }

    pub fn spec(&self) -> &'static DomainSpec {
        self.spec
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn set_field(&mut self, name: &str, value: FilterValue) -> Result<(), SearchError> {
        let spec = self.spec;
        let field = spec
            .field(name)
            .ok_or_else(|| SearchError::UnknownField {
                domain: spec.domain.as_str().to_string(),
                field: name.to_string(),
            })?;
        let value = match (field.kind, value) {
            (FieldKind::Scalar, FilterValue::Set(_)) => {
                return Err(SearchError::InvalidValue {
                    field: name.to_string(),
                    value: "multiple values".to_string(),
                })
            }
            (FieldKind::Set, FilterValue::Text(text)) => FilterValue::set_from_input(&text),
            (_, value) => value,
        };
        self.criteria.set(field.name, value);
        self.page = 1;
        Ok(())
    }

    /// Raw UI input for a field; `"all"` and blanks clear it.
    pub fn set_field_input(&mut self, name: &str, raw: &str) -> Result<(), SearchError> {
        let value = match self.spec.field(name).map(|f| f.kind) {
            Some(FieldKind::Set) => FilterValue::set_from_input(raw),
            _ => FilterValue::from_input(raw),
        };
        self.set_field(name, value)
    }

    pub fn set_sort(&mut self, sort: SortSpec) -> Result<(), SearchError> {
        if !self.spec.allows_sort(sort) {
            return Err(SearchError::InvalidSort(sort.as_str().to_string()));
        }
        self.sort = Some(sort);
        self.page = 1;
        Ok(())
    }

    pub fn set_sort_key(&mut self, key: &str) -> Result<(), SearchError> {
        let sort: SortSpec = key.parse().map_err(SearchError::InvalidSort)?;
        self.set_sort(sort)
    }

    /// Keystroke-level update of the free-text box; no page reset, no fetch.
    pub fn set_search_text(&mut self, text: &str) {
        self.search.text = text.to_string();
    }

    /// Keystroke-level update of a location box.
    pub fn set_location(&mut self, field: &str, value: &str) -> Result<(), SearchError> {
        if !self.spec.has_location_field(field) {
            return Err(SearchError::UnknownField {
                domain: self.spec.domain.as_str().to_string(),
                field: field.to_string(),
            });
        }
        self.search
            .locations
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    /// The user pressed search: the typed text now counts as a filter.
    pub fn submit_search(&mut self) {
        self.page = 1;
    }

    /// Pages outside `1..` are clamped to 1; the upper bound is the paginator's job.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.clamp(1, 100);
        self.page = 1;
    }

    pub fn reset_all(&mut self) {
        self.criteria
            .reset(self.spec.fields.iter().map(|f| f.name));
        self.search.clear();
        self.sort = self.spec.default_sort;
        self.page = 1;
    }

    /// Loads initial state from URL-style parameters.
    ///
    /// Unlike the setters this keeps the `page` parameter, so a shared link
    /// to page 3 opens on page 3. Unknown keys are ignored; a disallowed sort
    /// is an error.
    pub fn hydrate(&mut self, params: &QueryParams) -> Result<(), SearchError> {
        let spec = self.spec;
        for (key, value) in params.iter() {
            if let Some(field) = spec.field(key) {
                let parsed = match field.kind {
                    FieldKind::Set => FilterValue::set_from_input(value),
                    FieldKind::Scalar => FilterValue::from_input(value),
                };
                self.criteria.set(field.name, parsed);
            } else if self.spec.has_location_field(key) {
                self.search.locations.insert(key.to_string(), value.to_string());
            } else if key == "q" || key == self.spec.text_param {
                self.search.text = value.to_string();
            } else if key == "sort" && !value.is_empty() {
                let sort: SortSpec = value
                    .parse()
                    .map_err(SearchError::InvalidSort)?;
                if !self.spec.allows_sort(sort) {
                    return Err(SearchError::InvalidSort(value.to_string()));
                }
                self.sort = Some(sort);
            }
        }

        if let Some(limit) = params.get("limit").and_then(|l| l.parse::<u32>().ok()) {
            self.set_limit(limit);
        }
        self.page = params
            .get("page")
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{HOTELS, TOURS, TRANSPORT};

    #[test]
    fn test_every_filter_mutation_resets_page() {
        let mut store = FilterStateStore::new(&TOURS);
        store.set_page(4);
        store.set_field_input("region", "north").unwrap();
        assert_eq!(store.page(), 1);

        store.set_page(3);
        store.set_sort(SortSpec::PriceAsc).unwrap();
        assert_eq!(store.page(), 1);

        store.set_page(5);
        store.submit_search();
        assert_eq!(store.page(), 1);

        store.set_page(2);
        store.reset_all();
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_keystrokes_keep_page() {
        let mut store = FilterStateStore::new(&TOURS);
        store.set_page(3);
        store.set_search_text("Hạ L");
        store.set_location("destination", "Hạ Long").unwrap();
        assert_eq!(store.page(), 3);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut store = FilterStateStore::new(&HOTELS);
        assert!(matches!(
            store.set_field_input("vehicle_type", "bus"),
            Err(SearchError::UnknownField { .. })
        ));
        assert!(store.set_location("from_location", "Huế").is_err());
    }

    #[test]
    fn test_disallowed_sort_rejected() {
        let mut store = FilterStateStore::new(&HOTELS);
        assert!(store.set_sort(SortSpec::DepartureAsc).is_err());
        assert!(store.set_sort_key("random").is_err());
        assert_eq!(store.sort(), Some(SortSpec::RatingDesc));
    }

    #[test]
    fn test_reset_all_puts_fields_at_sentinel() {
        let mut store = FilterStateStore::new(&TOURS);
        store.set_field_input("region", "south").unwrap();
        store.set_search_text("Phú Quốc");
        store.set_sort(SortSpec::PriceDesc).unwrap();
        store.reset_all();
        for field in TOURS.fields {
            assert!(store.criteria().get(field.name).is_all(), "{}", field.name);
        }
        assert!(store.search().is_empty());
        assert_eq!(store.sort(), TOURS.default_sort);
    }

    #[test]
    fn test_hydrate_keeps_page_from_url() {
        let mut store = FilterStateStore::new(&TRANSPORT);
        let params = QueryParams::new()
            .with("from_location", "Hà Nội")
            .with("company", "Phương Trang")
            .with("sort", "price_asc")
            .with("page", "3");
        store.hydrate(&params).unwrap();
        assert_eq!(store.page(), 3);
        assert_eq!(store.search().location("from_location"), Some("Hà Nội"));
        assert_eq!(store.criteria().text("company"), Some("Phương Trang"));
        assert!(store.criteria().get("vehicle_type").is_unset());
    }

    #[test]
    fn test_limit_is_clamped_and_resets_page() {
        let mut store = FilterStateStore::new(&TOURS);
        store.set_page(5);
        store.set_limit(500);
        assert_eq!(store.limit(), 100);
        assert_eq!(store.page(), 1);

        let params = QueryParams::new().with("limit", "0").with("page", "2");
        store.hydrate(&params).unwrap();
        assert_eq!(store.limit(), 1);
        assert_eq!(store.page(), 2);
    }

    #[test]
    fn test_set_field_on_multi_select() {
        let mut store = FilterStateStore::new(&HOTELS);
        store
            .set_field("hotel_amenities", FilterValue::from_set(["wifi", "pool"]))
            .unwrap();
        assert_eq!(
            store.criteria().get("hotel_amenities").to_param().as_deref(),
            Some("pool,wifi")
        );
        assert!(store
            .set_field("star_rating", FilterValue::from_set(["4", "5"]))
            .is_err());
    }
}
