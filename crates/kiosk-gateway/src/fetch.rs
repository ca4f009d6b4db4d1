//! Upstream catalog fetching.

use std::time::{SystemTime, UNIX_EPOCH};

use kiosk_commerce::catalog::RawCatalog;
use thiserror::Error;

/// Errors fetching the upstream catalog. Parse problems are not errors:
/// the lenient model degrades them to the empty document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog HTTP {0}")]
    Status(u16),
}

/// Client for the upstream catalog endpoint.
///
/// Every request carries a `t=<unix-millis>` parameter so intermediary
/// caches (Telegram's webview in particular) never serve a stale
/// document.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    catalog_url: String,
}

impl CatalogClient {
    /// Create a client for the given endpoint.
    pub fn new(http: reqwest::Client, catalog_url: impl Into<String>) -> Self {
        Self {
            http,
            catalog_url: catalog_url.into(),
        }
    }

    /// Fetch and leniently parse the catalog document.
    pub async fn fetch(&self) -> Result<RawCatalog, FetchError> {
        let url = self.busted_url(unix_millis());
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(RawCatalog::parse(&bytes))
    }

    /// The endpoint URL with the cache-busting parameter appended,
    /// `?`/`&`-aware.
    fn busted_url(&self, millis: u128) -> String {
        let separator = if self.catalog_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!("{}{}t={}", self.catalog_url, separator, millis)
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
