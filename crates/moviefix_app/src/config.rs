//! Catalog settings from `moviefix.ron` plus environment overrides.
//!
//! Precedence, lowest first: built-in defaults, config file, environment.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use moviefix_engine::CatalogSettings;
use moviefix_logging::{mf_info, mf_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "moviefix.ron";

pub const ENV_BASE_URL: &str = "MOVIEFIX_BASE_URL";
pub const ENV_API_KEY: &str = "MOVIEFIX_API_KEY";
pub const ENV_TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_LANGUAGE: &str = "MOVIEFIX_LANGUAGE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    image_base_url: Option<String>,
    language: Option<String>,
    min_vote_count: Option<u32>,
    request_timeout_secs: Option<u64>,
}

/// Builds catalog settings.
///
/// `explicit_path` must exist when given; otherwise `moviefix.ron` in the
/// working directory is read if present. `env` looks up environment variables.
pub fn load_settings(
    explicit_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<CatalogSettings> {
    let file = match explicit_path {
        Some(path) => Some(read_file_config(path)?),
        None => {
            let default_path = Path::new(CONFIG_FILENAME);
            if default_path.exists() {
                Some(read_file_config(default_path)?)
            } else {
                None
            }
        }
    };

    let mut settings = CatalogSettings::default();
    if let Some(file) = file {
        apply_file(&mut settings, file);
    }
    apply_env(&mut settings, env);
    Ok(settings)
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let parsed: FileConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    mf_info!("Loaded config from {:?}", path);
    Ok(parsed)
}

fn apply_file(settings: &mut CatalogSettings, file: FileConfig) {
    if let Some(base_url) = file.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_key) = file.api_key {
        settings.api_key = api_key;
    }
    if let Some(image_base_url) = file.image_base_url {
        settings.image_base_url = image_base_url;
    }
    if file.language.is_some() {
        settings.language = file.language;
    }
    if let Some(min_vote_count) = file.min_vote_count {
        settings.min_vote_count = min_vote_count;
    }
    if let Some(secs) = file.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(secs);
    }
}

fn apply_env(settings: &mut CatalogSettings, env: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_empty(ENV_BASE_URL) {
        settings.base_url = base_url;
    }
    match (non_empty(ENV_API_KEY), non_empty(ENV_TMDB_API_KEY)) {
        (Some(key), _) => settings.api_key = key,
        (None, Some(key)) => {
            mf_warn!("{} not set; using {}", ENV_API_KEY, ENV_TMDB_API_KEY);
            settings.api_key = key;
        }
        (None, None) => {}
    }
    if let Some(language) = non_empty(ENV_LANGUAGE) {
        settings.language = Some(language);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{load_settings, ENV_API_KEY, ENV_BASE_URL, ENV_TMDB_API_KEY};

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"(
                api_key: Some("from-file"),
                language: Some("de-DE"),
                min_vote_count: Some(5),
                request_timeout_secs: Some(3),
            )"#,
        );

        let settings = load_settings(Some(file.path()), env_from(&[])).unwrap();
        assert_eq!(settings.api_key, "from-file");
        assert_eq!(settings.language.as_deref(), Some("de-DE"));
        assert_eq!(settings.min_vote_count, 5);
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.base_url, moviefix_engine::DEFAULT_BASE_URL);
    }

    #[test]
    fn env_overrides_file() {
        let file = write_config(r#"(api_key: Some("from-file"), base_url: Some("http://file"))"#);
        let settings = load_settings(
            Some(file.path()),
            env_from(&[(ENV_API_KEY, "from-env"), (ENV_BASE_URL, "http://env")]),
        )
        .unwrap();
        assert_eq!(settings.api_key, "from-env");
        assert_eq!(settings.base_url, "http://env");
    }

    #[test]
    fn tmdb_key_is_a_fallback() {
        let file = write_config("(api_key: None)");
        let settings =
            load_settings(Some(file.path()), env_from(&[(ENV_TMDB_API_KEY, "tmdb")])).unwrap();
        assert_eq!(settings.api_key, "tmdb");

        let settings = load_settings(
            Some(file.path()),
            env_from(&[(ENV_TMDB_API_KEY, "tmdb"), (ENV_API_KEY, "primary")]),
        )
        .unwrap();
        assert_eq!(settings.api_key, "primary");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(load_settings(Some(&missing), env_from(&[])).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("(api_key: 42");
        let err = load_settings(Some(file.path()), env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn loaded_settings_without_key_fail_validation() {
        let file = write_config("(api_key: None)");
        let settings = load_settings(Some(file.path()), env_from(&[])).unwrap();
        assert!(settings.validate().is_err());
    }
}
