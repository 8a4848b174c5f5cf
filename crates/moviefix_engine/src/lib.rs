//! MovieFix engine: catalog IO and effect execution.
mod catalog;
mod fetcher;
mod settings;
mod tmdb;

pub use catalog::Catalog;
pub use fetcher::PagedFetcher;
pub use settings::{CatalogSettings, SettingsError, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
pub use tmdb::TmdbCatalog;
