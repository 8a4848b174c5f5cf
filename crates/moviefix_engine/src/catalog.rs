use moviefix_core::{Category, FilterKey, Item, LoadError};

/// Remote catalog the pager reads from.
///
/// Each call is a single attempt; callers decide whether to try again.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Items of one page for `filter`. An empty page means there are no more.
    async fn fetch_items_page(&self, filter: &FilterKey, page: u32)
        -> Result<Vec<Item>, LoadError>;

    /// The full category vocabulary.
    async fn fetch_categories(&self) -> Result<Vec<Category>, LoadError>;
}
