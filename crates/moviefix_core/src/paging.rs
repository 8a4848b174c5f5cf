use serde::Serialize;

use crate::{FilterKey, Item, LoadError};

/// Token for one outstanding page fetch.
///
/// A response is only applied when the request still matches the state it
/// was issued from; anything else is a stale response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub filter: FilterKey,
    pub session: u64,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageApplied {
    Appended,
    Failed,
    Stale,
}

/// Read-only view of the accumulated pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub filter: FilterKey,
    pub items: Vec<Item>,
    pub page_count: usize,
    pub next_page: u32,
    pub loading: bool,
    pub has_more: bool,
    pub error: Option<LoadError>,
}

/// Incrementally growing page list for one filter key.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    filter: FilterKey,
    session: u64,
    pages: Vec<Vec<Item>>,
    has_more: bool,
    loading: bool,
    error: Option<LoadError>,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(FilterKey::default())
    }
}

impl PageState {
    pub fn new(filter: FilterKey) -> Self {
        Self::for_session(filter, 0)
    }

    fn for_session(filter: FilterKey, session: u64) -> Self {
        Self {
            filter,
            session,
            pages: Vec::new(),
            has_more: true,
            loading: false,
            error: None,
        }
    }

    pub fn filter(&self) -> &FilterKey {
        &self.filter
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn next_page_number(&self) -> u32 {
        u32::try_from(self.pages.len()).map_or(u32::MAX, |count| count.saturating_add(1))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// All accumulated items, page by page.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.pages.iter().flatten()
    }

    /// Starts over with `filter` unless it equals the current key.
    ///
    /// Returns whether the state was replaced. Replacing bumps the session so
    /// responses for the previous state are recognised as stale even if the
    /// same filter is selected again later.
    pub fn reset(&mut self, filter: FilterKey) -> bool {
        if filter == self.filter {
            return false;
        }
        *self = Self::for_session(filter, self.session.wrapping_add(1));
        true
    }

    /// Claims the next page for fetching.
    ///
    /// Returns `None` while a fetch is outstanding or once the end of the
    /// results has been seen.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            filter: self.filter.clone(),
            session: self.session,
            page: self.next_page_number(),
        })
    }

    /// Applies the outcome of a fetch started by [`PageState::begin_load`].
    pub fn apply(
        &mut self,
        request: &PageRequest,
        result: Result<Vec<Item>, LoadError>,
    ) -> PageApplied {
        if !self.is_current(request) {
            return PageApplied::Stale;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.has_more = !items.is_empty();
                self.error = None;
                self.pages.push(items);
                PageApplied::Appended
            }
            Err(err) => {
                // has_more is untouched so the same page can be retried.
                self.error = Some(err);
                PageApplied::Failed
            }
        }
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        self.loading
            && request.session == self.session
            && request.filter == self.filter
            && request.page == self.next_page_number()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            filter: self.filter.clone(),
            items: self.items().cloned().collect(),
            page_count: self.pages.len(),
            next_page: self.next_page_number(),
            loading: self.loading,
            has_more: self.has_more,
            error: self.error.clone(),
        }
    }
}
