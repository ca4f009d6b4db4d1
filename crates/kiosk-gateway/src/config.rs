//! Gateway configuration from the environment.

use std::net::SocketAddr;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upstream catalog endpoint.
    pub catalog_url: String,
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Default log filter when RUST_LOG is unset.
    pub log_filter: String,
}

const DEFAULT_CATALOG_URL: &str = "https://urbfgi.fun/api/catalog.php";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_FILTER: &str = "info";

impl GatewayConfig {
    /// Read the configuration from `KIOSK_*` environment variables,
    /// falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let catalog_url = std::env::var("KIOSK_CATALOG_URL")
            .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string())
            .trim()
            .to_string();
        let bind_addr = std::env::var("KIOSK_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()?;
        let log_filter =
            std::env::var("KIOSK_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        Ok(Self {
            catalog_url,
            bind_addr,
            log_filter,
        })
    }

    /// The `scheme://host` origin of the catalog URL, used to resolve
    /// relative image references and to pin the image proxy.
    pub fn catalog_origin(&self) -> String {
        origin_of(&self.catalog_url)
    }
}

/// Extract `scheme://host[:port]` from a URL, or the default catalog
/// origin when the URL has no recognizable scheme.
pub fn origin_of(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return origin_of(DEFAULT_CATALOG_URL);
    };
    let rest = &url[scheme_end + 3..];
    let host_end = rest.find('/').unwrap_or(rest.len());
    format!("{}{}", &url[..scheme_end + 3], &rest[..host_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_of_full_url() {
        assert_eq!(
            origin_of("https://shop.example/api/catalog.php"),
            "https://shop.example"
        );
    }

    #[test]
    fn test_origin_keeps_port() {
        assert_eq!(
            origin_of("http://localhost:8080/api/catalog.php"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_origin_without_path() {
        assert_eq!(origin_of("https://shop.example"), "https://shop.example");
    }

    #[test]
    fn test_origin_of_schemeless_falls_back() {
        assert_eq!(origin_of("not a url"), "https://urbfgi.fun");
    }
}
