//! MovieFix core: pure paging state machine, year grouping and view-model helpers.
mod effect;
mod error;
mod filter;
mod group;
mod model;
mod msg;
mod paging;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::LoadError;
pub use filter::FilterKey;
pub use group::{
    extract_year, genre_label, group_by_year, poster_url, BucketItem, YearBucket, YearKey,
    INVALID_YEAR_KEY,
};
pub use model::{Categories, Category, Item};
pub use msg::Msg;
pub use paging::{PageApplied, PageRequest, PageSnapshot, PageState};
pub use state::{AppState, CategoryLoad};
pub use update::update;
pub use view_model::{AppViewModel, CategoryChipView};
