use std::sync::Arc;

use chrono::Utc;
use log::{debug, error};
use serde::Serialize;
use url::Url;

use crate::error::SearchError;
use crate::http::api_client::{ApiClient, QueryParams};
use crate::models::domain::{DomainSpec, FilterScope, PaginationMode};
use crate::models::listing::ListingItem;
use crate::models::pagination::{PageLink, PaginationState};
use crate::services::filter_state::FilterStateStore;
use crate::services::pagination_service::{page_window, plan_page_change, slice_page, PageChange};
use crate::services::query_executor::{ListingPage, QueryExecutor};
use crate::services::refiner::{refine, RefineCriteria};

/// Issued when a fetch starts. Only the newest ticket may write results back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Fresh,
    /// A newer fetch was started after this one; the response was dropped.
    Stale,
}

/// What the renderer needs for one listing page.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView<T> {
    pub items: Vec<T>,
    pub pagination: PaginationState,
    pub page_window: Vec<PageLink>,
    pub error: Option<String>,
    pub retryable: bool,
    pub empty: bool,
    pub scroll_to_results: bool,
}

/// Search, filter and paginate for one listing, whatever its item type.
pub struct SfpController<T: ListingItem> {
    store: FilterStateStore,
    executor: QueryExecutor,
    /// Refined rows; the whole set when paginating locally, one page otherwise.
    refined: Vec<T>,
    visible: Vec<T>,
    pagination: PaginationState,
    error: Option<&'static str>,
    loading: bool,
    scroll_to_results: bool,
    generation: u64,
}

impl<T: ListingItem> SfpController<T> {
    pub fn new(client: Arc<dyn ApiClient>, host: Url) -> Self {
        let spec = T::DOMAIN.spec();
        Self::with_store(FilterStateStore::new(spec), client, host)
    }

    pub fn with_store(store: FilterStateStore, client: Arc<dyn ApiClient>, host: Url) -> Self {
        let spec = store.spec();
        let pagination = PaginationState::resume(store.page(), store.limit());
        Self {
            executor: QueryExecutor::new(client, spec, host),
            store,
            refined: Vec::new(),
            visible: Vec::new(),
            pagination,
            error: None,
            loading: false,
            scroll_to_results: false,
            generation: 0,
        }
    }

    pub fn spec(&self) -> &'static DomainSpec {
        self.store.spec()
    }

    pub fn store(&self) -> &FilterStateStore {
        &self.store
    }

    /// Direct access for setters; call [`refresh`](Self::refresh) afterwards.
    pub fn store_mut(&mut self) -> &mut FilterStateStore {
        &mut self.store
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// Starts a fetch for the current state and returns its ticket and parameters.
    pub fn begin_fetch(&mut self) -> (FetchTicket, QueryParams) {
        self.generation += 1;
        self.loading = true;
        let params = QueryExecutor::build_params(&self.store);
        debug!(
            "{} fetch #{}: {}",
            self.spec().domain.as_str(),
            self.generation,
            params.to_query_string()
        );
        (
            FetchTicket {
                generation: self.generation,
            },
            params,
        )
    }

    /// Writes a fetch result back unless a newer fetch has started since.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListingPage<T>, SearchError>,
    ) -> Applied {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale {} response #{} (latest #{})",
                self.spec().domain.as_str(),
                ticket.generation,
                self.generation
            );
            return Applied::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.error = None;
                self.absorb(page);
            }
            Err(err) => {
                error!("Loading {} failed: {}", self.spec().domain.as_str(), err);
                self.error = Some(err.user_message());
                self.refined.clear();
                self.visible.clear();
            }
        }
        Applied::Fresh
    }

    pub async fn refresh(&mut self) -> Applied {
        let (ticket, params) = self.begin_fetch();
        let result = self.executor.execute::<T>(&params).await;
        self.apply(ticket, result)
    }

    /// Out-of-range targets are ignored. Server-paginated listings refetch;
    /// local ones re-slice.
    pub async fn go_to_page(&mut self, page: u32) -> PageChange {
        let server_driven = self.spec().pagination == PaginationMode::Server;
        let change = plan_page_change(&self.pagination, page, server_driven);
        match change {
            PageChange::Ignored => {}
            PageChange::Sliced => {
                self.store.set_page(page);
                self.reslice();
            }
            PageChange::Fetch(target) => {
                self.store.set_page(target);
                if self.refresh().await == Applied::Fresh {
                    self.scroll_to_results = true;
                }
            }
        }
        change
    }

    pub async fn next_page(&mut self) -> PageChange {
        if !self.pagination.has_next() {
            return PageChange::Ignored;
        }
        self.go_to_page(self.pagination.page + 1).await
    }

    pub async fn prev_page(&mut self) -> PageChange {
        if !self.pagination.has_prev() {
            return PageChange::Ignored;
        }
        self.go_to_page(self.pagination.page - 1).await
    }

    pub fn view(&self) -> ListingView<T> {
        ListingView {
            items: self.visible.clone(),
            pagination: self.pagination,
            page_window: page_window(self.pagination.page, self.pagination.total_pages),
            error: self.error.map(str::to_string),
            retryable: self.error.is_some(),
            empty: self.error.is_none() && self.visible.is_empty(),
            scroll_to_results: self.scroll_to_results,
        }
    }

    fn refine_criteria(&self) -> RefineCriteria {
        let spec = self.spec();
        let mut criteria = RefineCriteria::from_criteria(self.store.criteria());
        if spec.text_scope == FilterScope::Client {
            criteria.text = self.store.search().trimmed_text().map(str::to_string);
        }
        if spec.pagination == PaginationMode::Client {
            criteria.sort = self.store.sort();
        }
        criteria
    }

    fn absorb(&mut self, page: ListingPage<T>) {
        let criteria = self.refine_criteria();
        let fetched = page.items.len();
        self.refined = if criteria.is_empty() {
            page.items
        } else {
            refine(&page.items, &criteria, Utc::now())
        };

        match self.spec().pagination {
            PaginationMode::Client => self.reslice(),
            PaginationMode::Server => {
                let requested = self.store.page();
                let limit = self.store.limit();
                self.pagination = match page.pagination.as_ref() {
                    Some(meta) => PaginationState::from_server(meta, requested, limit),
                    None => PaginationState::from_total(requested, limit, fetched as u64),
                };
                self.visible = self.refined.clone();
            }
        }
    }

    fn reslice(&mut self) {
        self.pagination = PaginationState::from_total(
            self.store.page(),
            self.store.limit(),
            self.refined.len() as u64,
        );
        self.visible = slice_page(&self.refined, self.pagination.page, self.pagination.limit);
    }
}
