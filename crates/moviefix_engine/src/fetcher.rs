use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use moviefix_core::{
    update, AppState, AppViewModel, Categories, CategoryLoad, Effect, FilterKey, Msg, PageSnapshot,
};
use moviefix_logging::{mf_debug, mf_info, mf_warn};

use crate::Catalog;

/// Drives the pure paging state against a [`Catalog`].
///
/// Messages are applied under a short lock; the lock is never held while a
/// request is awaited, so `reset` and `snapshot` stay responsive during a
/// fetch. Collaborator failures are recorded in the state, never returned.
pub struct PagedFetcher {
    catalog: Arc<dyn Catalog>,
    state: Mutex<AppState>,
}

impl PagedFetcher {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self::with_filter(catalog, FilterKey::default())
    }

    pub fn with_filter(catalog: Arc<dyn Catalog>, filter: FilterKey) -> Self {
        Self {
            catalog,
            state: Mutex::new(AppState::with_filter(filter)),
        }
    }

    /// Switches to `filter`, dropping accumulated pages if it differs.
    pub fn reset(&self, filter: FilterKey) {
        self.dispatch(Msg::FiltersChanged(filter));
    }

    pub fn select_year(&self, year: Option<i32>) {
        self.dispatch(Msg::YearSelected(year));
    }

    pub fn toggle_category(&self, id: i64) {
        self.dispatch(Msg::CategoryToggled(id));
    }

    /// Fetches the next page unless one is already in flight or the end was reached.
    pub async fn load_next(&self) {
        let effects = self.dispatch(Msg::LoadNextRequested);
        if effects.is_empty() {
            mf_debug!("load_next ignored: busy or exhausted");
        }
        self.run(effects).await;
    }

    /// Loads the category vocabulary if it is not loaded yet.
    pub async fn load_categories(&self) {
        let effects = self.dispatch(Msg::CategoriesRequested);
        self.run(effects).await;
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().snapshot()
    }

    pub fn view(&self) -> AppViewModel {
        self.lock().view()
    }

    pub fn filter(&self) -> FilterKey {
        self.lock().filter().clone()
    }

    pub fn categories(&self) -> Categories {
        self.lock().categories()
    }

    /// Whether the loaded vocabulary knows `id`. False until it loads.
    pub fn has_category(&self, id: i64) -> bool {
        matches!(
            self.lock().category_load(),
            CategoryLoad::Loaded(categories) if categories.contains(id)
        )
    }

    pub fn categories_loaded(&self) -> bool {
        matches!(self.lock().category_load(), CategoryLoad::Loaded(_))
    }

    pub fn categories_failed(&self) -> bool {
        matches!(self.lock().category_load(), CategoryLoad::Failed(_))
    }

    /// Returns whether the state changed since the last call.
    pub fn consume_dirty(&self) -> bool {
        self.lock().consume_dirty()
    }

    async fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    mf_info!("fetching page {} ({})", request.page, request.filter);
                    let result = self
                        .catalog
                        .fetch_items_page(&request.filter, request.page)
                        .await;
                    if let Err(err) = &result {
                        mf_warn!("page {} failed: {}", request.page, err);
                    }
                    let session = self.lock().pages().session();
                    if session != request.session {
                        mf_debug!(
                            "discarding stale page {} for ({})",
                            request.page,
                            request.filter
                        );
                    }
                    self.dispatch(Msg::PageLoaded { request, result });
                }
                Effect::FetchCategories => {
                    let result = self.catalog.fetch_categories().await;
                    match &result {
                        Ok(categories) => mf_info!("loaded {} categories", categories.len()),
                        Err(err) => mf_warn!("category load failed: {}", err),
                    }
                    self.dispatch(Msg::CategoriesLoaded(result));
                }
            }
        }
    }

    fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // The state is replaced wholesale under the lock, so a poisoned guard
        // still holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
