use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use super::Catalog;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    FilePath(String),
    Url(String),
    Inline(String),
}

impl CatalogSource {
    /// `http://` and `https://` locations are fetched, anything else is read from disk.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::FilePath(trimmed.to_string())
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            CatalogSource::FilePath(path) => path,
            CatalogSource::Url(url) => url,
            CatalogSource::Inline(_) => "<inline>",
        }
    }

    fn needs_http(&self) -> bool {
        matches!(self, CatalogSource::Url(_))
    }
}

#[derive(Clone, Debug)]
pub struct CatalogSources {
    pub items: CatalogSource,
    pub bosses: CatalogSource,
}

impl Default for CatalogSources {
    fn default() -> Self {
        Self {
            items: CatalogSource::FilePath("./data/items.json".to_string()),
            bosses: CatalogSource::FilePath("./data/bosses.json".to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub timeout_seconds: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { timeout_seconds: 10 }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {kind} file: {path}: {source}")]
    FileRead {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {kind}: {url}: {source}")]
    Fetch {
        kind: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {kind}: {url}: HTTP {status}")]
    HttpStatus {
        kind: &'static str,
        url: String,
        status: u16,
    },

    #[error("failed to parse {kind}: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

/// Reads both documents concurrently and parses them. Either failing fails the load.
pub async fn load(sources: &CatalogSources, options: &LoadOptions) -> Result<Catalog, LoadError> {
    let started = Instant::now();
    let client = if sources.items.needs_http() || sources.bosses.needs_http() {
        Some(build_client(options)?)
    } else {
        None
    };

    let (items, bosses) = tokio::try_join!(
        read_source("items", &sources.items, client.as_ref()),
        read_source("bosses", &sources.bosses, client.as_ref()),
    )?;

    let catalog = Catalog::from_json(&items, &bosses)?;
    tracing::info!(
        items = catalog.items.len(),
        bosses = catalog.bosses.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "catalog loaded"
    );
    Ok(catalog)
}

fn build_client(options: &LoadOptions) -> Result<reqwest::Client, LoadError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(options.timeout_seconds.max(1)))
        .build()
        .map_err(|source| LoadError::HttpClientBuild { source })
}

async fn read_source(
    kind: &'static str,
    source: &CatalogSource,
    client: Option<&reqwest::Client>,
) -> Result<String, LoadError> {
    tracing::debug!(kind, source = source.describe(), "reading catalog source");
    match source {
        CatalogSource::Inline(text) => Ok(text.clone()),
        CatalogSource::FilePath(path) => {
            let path = crate::config::expand_tilde(path);
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| LoadError::FileRead {
                    kind,
                    path: path.display().to_string(),
                    source,
                })
        }
        CatalogSource::Url(url) => {
            let fetch_err = |source| LoadError::Fetch {
                kind,
                url: url.clone(),
                source,
            };
            let client = match client {
                Some(client) => client.clone(),
                None => build_client(&LoadOptions::default())?,
            };
            let response = client.get(url).send().await.map_err(fetch_err)?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::HttpStatus {
                    kind,
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            response.text().await.map_err(fetch_err)
        }
    }
}
