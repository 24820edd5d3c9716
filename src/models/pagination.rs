use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationState {
    /// Placeholder for a listing opened on `page` before anything was fetched.
    /// `total_pages` is at least `page`, so a failed first load keeps the page.
    pub fn resume(page: u32, limit: u32) -> Self {
        let page = page.max(1);
        Self {
            page,
            limit: limit.max(1),
            total: 0,
            total_pages: page,
        }
    }

    /// Derives `total_pages` locally; an empty result still has one page.
    pub fn from_total(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total_pages_for(total, limit);
        Self {
            page: page.clamp(1, total_pages),
            limit,
            total,
            total_pages,
        }
    }

    /// Takes the server's numbers verbatim, except that zero pages becomes one.
    pub fn from_server(meta: &ServerPagination, requested_page: u32, limit: u32) -> Self {
        let limit = meta.limit.unwrap_or(limit).max(1);
        let total = meta.total.unwrap_or(0);
        let total_pages = match meta.total_pages {
            Some(pages) => pages.max(1),
            None => total_pages_for(total, limit),
        };
        let page = meta.page.unwrap_or(requested_page);
        Self {
            page: page.clamp(1, total_pages),
            limit,
            total,
            total_pages,
        }
    }

    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

pub fn total_pages_for(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// `pagination` object as the backend sends it. Every field is optional
/// because the endpoints disagree on which ones they fill in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerPagination {
    #[serde(default, deserialize_with = "super::lenient::opt_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "super::lenient::opt_u32")]
    pub limit: Option<u32>,
    #[serde(default, deserialize_with = "super::lenient::opt_u64")]
    pub total: Option<u64>,
    #[serde(
        default,
        alias = "totalPages",
        deserialize_with = "super::lenient::opt_u32"
    )]
    pub total_pages: Option<u32>,
}

/// One button in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageLink {
    Page(u32),
    Ellipsis,
}
