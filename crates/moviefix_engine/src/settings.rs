use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("api key is empty")]
    MissingApiKey,
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Connection settings for the remote catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: String,
    pub image_base_url: String,
    /// Optional `language` query parameter, e.g. `en-US`.
    pub language: Option<String>,
    pub sort_by: String,
    /// Lower bound for `vote_count.gte`; keeps obscure entries out.
    pub min_vote_count: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: None,
            sort_by: "popularity.desc".to_string(),
            min_vote_count: 100,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

impl CatalogSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.api_key.trim().is_empty() {
            return Err(SettingsError::MissingApiKey);
        }
        let parsed =
            url::Url::parse(&self.base_url).map_err(|err| SettingsError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: err.to_string(),
            })?;
        if parsed.cannot_be_a_base() {
            return Err(SettingsError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: "not a base url".to_string(),
            });
        }
        Ok(())
    }

    /// `base_url` joined with an API path such as `/discover/movie`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
