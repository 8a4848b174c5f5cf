use crate::{Category, FilterKey, Item, LoadError, PageRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Presentation layer replaced the whole filter selection.
    FiltersChanged(FilterKey),
    /// User picked a release year (`None` clears it).
    YearSelected(Option<i32>),
    /// User tapped a genre chip.
    CategoryToggled(i64),
    /// List scrolled near its end; fetch the next page if allowed.
    LoadNextRequested,
    /// Catalog answered a page request.
    PageLoaded {
        request: PageRequest,
        result: Result<Vec<Item>, LoadError>,
    },
    /// Genre vocabulary is needed.
    CategoriesRequested,
    /// Catalog answered the genre vocabulary request.
    CategoriesLoaded(Result<Vec<Category>, LoadError>),
}
