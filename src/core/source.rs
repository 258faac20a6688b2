//! Catalog data source: a JSON document on disk or behind an HTTP URL

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use super::article::Article;

/// Default catalog document, relative to the working directory
pub const DEFAULT_DATA_SOURCE: &str = "data.json";

/// Failure to obtain the catalog document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: Url, status: reqwest::StatusCode },
    #[error("catalog document is not a valid article list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid data source {0:?}")]
    InvalidSource(String),
}

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(Url),
    File(PathBuf),
}

impl DataSource {
    /// Interpret a data source string: http(s) URLs are fetched over the
    /// network, anything else is a local path
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LoadError::InvalidSource(text.to_string()));
        }

        if text.starts_with("http://") || text.starts_with("https://") {
            let url = Url::parse(text).map_err(|_| LoadError::InvalidSource(text.to_string()))?;
            return Ok(DataSource::Http(url));
        }

        if let Some(rest) = text.strip_prefix("file://") {
            return Ok(DataSource::File(PathBuf::from(rest)));
        }

        Ok(DataSource::File(PathBuf::from(text)))
    }

    /// Fetch and decode the article list
    pub async fn fetch(&self) -> Result<Vec<Article>, LoadError> {
        let bytes = match self {
            DataSource::Http(url) => fetch_http(url).await?,
            DataSource::File(path) => tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?,
        };

        let records: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;
        Ok(records.into_iter().map(Article::from_value).collect())
    }

    /// Resolve an asset path found in the catalog relative to the document
    /// itself. Absolute URLs pass through unchanged.
    pub fn resolve_asset(&self, asset: &str) -> String {
        if Url::parse(asset).is_ok_and(|url| url.has_host() || url.scheme() == "file") {
            return asset.to_string();
        }

        match self {
            DataSource::Http(base) => base
                .join(asset)
                .map(String::from)
                .unwrap_or_else(|_| asset.to_string()),
            DataSource::File(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                let full = absolute(&dir.join(asset));
                Url::from_file_path(&full)
                    .map(String::from)
                    .unwrap_or_else(|_| full.to_string_lossy().to_string())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::File(PathBuf::from(DEFAULT_DATA_SOURCE))
    }
}

async fn fetch_http(url: &Url) -> Result<Vec<u8>, LoadError> {
    let http_err = |source| LoadError::Http {
        url: url.clone(),
        source,
    };

    let response = reqwest::get(url.clone()).await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.clone(),
            status,
        });
    }

    let body = response.bytes().await.map_err(http_err)?;
    Ok(body.to_vec())
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_parse_source_kinds() {
        assert_eq!(
            DataSource::parse("https://example.com/blog/data.json").unwrap(),
            DataSource::Http(Url::parse("https://example.com/blog/data.json").unwrap())
        );
        assert_eq!(
            DataSource::parse("data.json").unwrap(),
            DataSource::File(PathBuf::from("data.json"))
        );
        assert!(matches!(
            DataSource::parse("  "),
            Err(LoadError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_resolve_asset_against_http_base() {
        let source = DataSource::parse("https://example.com/blog/data.json").unwrap();
        assert_eq!(
            source.resolve_asset("images/go.png"),
            "https://example.com/blog/images/go.png"
        );
        assert_eq!(
            source.resolve_asset("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_resolve_asset_against_file_base() {
        let source = DataSource::File(PathBuf::from("/srv/site/data.json"));
        assert_eq!(
            source.resolve_asset("images/go.png"),
            "file:///srv/site/images/go.png"
        );
    }

    #[test]
    fn test_fetch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"[{"id": 1, "title": "Go Basics"}]"#).unwrap();

        let articles = block_on(DataSource::File(path).fetch()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Go Basics");
    }

    #[test]
    fn test_fetch_keeps_catalog_with_one_bad_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "title": "Go Basics", "author": null}, {"id": 2, "title": 2024}]"#,
        )
        .unwrap();

        let articles = block_on(DataSource::File(path).fetch()).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].author, "");
        assert_eq!(articles[1].title, "2024");
    }

    #[test]
    fn test_fetch_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = block_on(DataSource::File(dir.path().join("missing.json")).fetch());
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_fetch_malformed_document_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"not": "a list"}"#).unwrap();

        let result = block_on(DataSource::File(path).fetch());
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
