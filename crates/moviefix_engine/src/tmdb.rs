use futures_util::StreamExt;
use moviefix_core::{Category, FilterKey, Item, LoadError};
use moviefix_logging::{mf_debug, mf_warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{Catalog, CatalogSettings, SettingsError};

const DISCOVER_PATH: &str = "/discover/movie";
const GENRES_PATH: &str = "/genre/movie/list";
const MAX_ERROR_MESSAGE: usize = 200;

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<MovieRecord>,
}

#[derive(Debug, Deserialize)]
struct MovieRecord {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    genre_ids: Vec<i64>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    vote_average: f64,
}

impl From<MovieRecord> for Item {
    fn from(record: MovieRecord) -> Self {
        Item {
            id: record.id,
            title: record.title,
            release_date: record.release_date.unwrap_or_default(),
            category_ids: record.genre_ids,
            poster_path: record.poster_path.unwrap_or_default(),
            score: record.vote_average,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<GenreRecord>,
}

#[derive(Debug, Deserialize)]
struct GenreRecord {
    id: i64,
    name: String,
}

/// Error payload TMDB attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    status_message: String,
}

/// [`Catalog`] backed by the TMDB v3 REST API.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl TmdbCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SettingsError::HttpClient(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Discover URL for one page of `filter`, including the api key.
    pub fn discover_url(&self, filter: &FilterKey, page: u32) -> Result<Url, LoadError> {
        let mut url = self.endpoint_url(DISCOVER_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.settings.api_key);
            query.append_pair("sort_by", &self.settings.sort_by);
            query.append_pair("vote_count.gte", &self.settings.min_vote_count.to_string());
            if let Some(year) = filter.year() {
                query.append_pair("primary_release_year", &year.to_string());
            }
            let genres = filter
                .category_ids()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            if !genres.is_empty() {
                query.append_pair("with_genres", &genres);
            }
            if let Some(language) = &self.settings.language {
                query.append_pair("language", language);
            }
            query.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    fn genres_url(&self) -> Result<Url, LoadError> {
        let mut url = self.endpoint_url(GENRES_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.settings.api_key);
            if let Some(language) = &self.settings.language {
                query.append_pair("language", language);
            }
        }
        Ok(url)
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, LoadError> {
        Url::parse(&self.settings.endpoint(path))
            .map_err(|err| LoadError::InvalidResponse(format!("bad endpoint {path}: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LoadError> {
        let path = url.path().to_string();
        mf_debug!("GET {}", path);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let max_bytes = self.settings.max_bytes;
        if !status.is_success() {
            // Error bodies are only read for the message, so a large one is cut short.
            let body = read_body_prefix(response, max_bytes).await?;
            let message = api_error_message(&body);
            mf_warn!("GET {} failed with {}: {}", path, status.as_u16(), message);
            return Err(LoadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| LoadError::InvalidResponse(format!("{path}: {err}")))
    }
}

#[async_trait::async_trait]
impl Catalog for TmdbCatalog {
    async fn fetch_items_page(
        &self,
        filter: &FilterKey,
        page: u32,
    ) -> Result<Vec<Item>, LoadError> {
        let url = self.discover_url(filter, page)?;
        let response: DiscoverResponse = self.get_json(url).await?;
        mf_debug!(
            "discover page={} filter=({}) items={}",
            page,
            filter,
            response.results.len()
        );
        Ok(response.results.into_iter().map(Item::from).collect())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, LoadError> {
        let url = self.genres_url()?;
        let response: GenreListResponse = self.get_json(url).await?;
        Ok(response
            .genres
            .into_iter()
            .map(|genre| Category {
                id: genre.id,
                name: genre.name,
            })
            .collect())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LoadError {
    if err.is_timeout() {
        return LoadError::Network(format!("timeout: {err}"));
    }
    LoadError::Network(err.to_string())
}

/// Reads at most `max_bytes` of the body and drops the rest.
async fn read_body_prefix(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, LoadError> {
    let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn too_large(max_bytes: u64, actual: u64) -> LoadError {
    LoadError::InvalidResponse(format!(
        "response too large (max {max_bytes}, actual {actual})"
    ))
}

fn api_error_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ApiErrorBody>(body) {
        return parsed.status_message;
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_MESSAGE) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
