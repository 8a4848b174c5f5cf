use crate::view_model::{AppViewModel, CategoryChipView};
use crate::{group_by_year, Categories, Category, FilterKey, LoadError, PageSnapshot, PageState};

/// Lifecycle of the category vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryLoad {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Categories),
    Failed(LoadError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pages: PageState,
    categories: CategoryLoad,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterKey) -> Self {
        Self {
            pages: PageState::new(filter),
            ..Self::default()
        }
    }

    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    pub(crate) fn pages_mut(&mut self) -> &mut PageState {
        &mut self.pages
    }

    pub fn filter(&self) -> &FilterKey {
        self.pages.filter()
    }

    pub fn category_load(&self) -> &CategoryLoad {
        &self.categories
    }

    pub(crate) fn set_category_load(&mut self, load: CategoryLoad) {
        self.categories = load;
    }

    /// Loaded categories, or an empty set before they arrive.
    pub fn categories(&self) -> Categories {
        match &self.categories {
            CategoryLoad::Loaded(categories) => categories.clone(),
            _ => Categories::default(),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.pages.snapshot()
    }

    pub fn view(&self) -> AppViewModel {
        let empty = Categories::default();
        let categories = match &self.categories {
            CategoryLoad::Loaded(categories) => categories,
            _ => &empty,
        };
        let filter = self.pages.filter();

        AppViewModel {
            buckets: group_by_year(self.pages.items(), categories),
            chips: categories
                .iter()
                .map(|Category { id, name }| CategoryChipView {
                    id: *id,
                    name: name.clone(),
                    selected: filter.has_category(*id),
                })
                .collect(),
            categories_loading: self.categories == CategoryLoad::Loading,
            categories_error: match &self.categories {
                CategoryLoad::Failed(err) => Some(err.clone()),
                _ => None,
            },
            page: self.pages.snapshot(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
