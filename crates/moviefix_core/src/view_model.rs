use serde::Serialize;

use crate::{LoadError, PageSnapshot, YearBucket};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppViewModel {
    pub page: PageSnapshot,
    pub buckets: Vec<YearBucket>,
    pub chips: Vec<CategoryChipView>,
    pub categories_loading: bool,
    pub categories_error: Option<LoadError>,
    #[serde(skip)]
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryChipView {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}
