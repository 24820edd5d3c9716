use crate::models::pagination::{PageLink, PaginationState};

/// Above this many pages the pager collapses into a window.
pub const FULL_PAGER_MAX: u32 = 5;
/// Pages shown either side of the current one.
pub const WINDOW_RADIUS: u32 = 2;

/// Pager buttons: every page when there are few, otherwise first, last and
/// `current ± 2` with an ellipsis standing in for each skipped run.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);

    if total_pages <= FULL_PAGER_MAX {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = (current + WINDOW_RADIUS).min(total_pages);

    let mut pages: Vec<u32> = vec![1];
    pages.extend(start..=end);
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut links = Vec::with_capacity(pages.len() + 2);
    let mut previous = 0;
    for page in pages {
        if previous != 0 && page > previous + 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page(page));
        previous = page;
    }
    links
}

/// Result of asking the pager to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// Out of range; nothing happens.
    Ignored,
    /// The slice was recomputed locally.
    Sliced,
    /// A request for the new page is needed.
    Fetch(u32),
}

/// Client-driven slice `[(page-1)*limit, page*limit)` of the refined rows.
pub fn slice_page<T: Clone>(items: &[T], page: u32, limit: u32) -> Vec<T> {
    let limit = limit.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(limit);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + limit).min(items.len());
    items[start..end].to_vec()
}

/// Decides what a page jump means under each pagination discipline.
pub fn plan_page_change(state: &PaginationState, target: u32, server_driven: bool) -> PageChange {
    if !state.contains(target) {
        return PageChange::Ignored;
    }
    if server_driven {
        PageChange::Fetch(target)
    } else {
        PageChange::Sliced
    }
}
