//! Provider backed by static catalog data

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::ProductProvider;
use crate::endpoint::{Endpoint, ProductEndpoint};
use crate::error::{ProductError, ProductResult};

/// The catalog shipped with the crate
pub const EMBEDDED_CATALOG: &str = include_str!("../../fixtures/products.json");

/// Serves the bundled catalog for every endpoint.
///
/// With a fixture path configured, the file is read on each request and a
/// missing or unreadable file is a [`ProductError::DataLoading`]. Without one
/// the embedded catalog is served. An optional latency is awaited before each
/// request to mimic a network round trip.
#[derive(Debug, Clone, Default)]
pub struct BundledProductProvider {
    fixture_path: Option<PathBuf>,
    latency: Duration,
}

impl BundledProductProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = Some(path.into());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn fixture_path(&self) -> Option<&Path> {
        self.fixture_path.as_deref()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn load(&self) -> ProductResult<Vec<u8>> {
        match &self.fixture_path {
            Some(path) => tokio::fs::read(path).await.map_err(|e| {
                warn!(path = %path.display(), error = %e, "catalog fixture unreadable");
                ProductError::DataLoading(format!("{}: {}", path.display(), e))
            }),
            None => Ok(EMBEDDED_CATALOG.as_bytes().to_vec()),
        }
    }
}

#[async_trait]
impl ProductProvider for BundledProductProvider {
    #[instrument(skip(self, endpoint), fields(endpoint = endpoint.name(), url = %endpoint.url()))]
    async fn fetch_payload(&self, endpoint: &ProductEndpoint) -> ProductResult<Vec<u8>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let payload = self.load().await?;
        debug!(bytes = payload.len(), "catalog payload loaded");
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "bundled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::provider::ProviderExt;
    use std::io::Write;

    #[tokio::test]
    async fn test_embedded_catalog_decodes() {
        let provider = BundledProductProvider::new();
        let products: Vec<Product> = provider.request(&ProductEndpoint::list()).await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, "2059389276");
        assert_eq!(products[0].discount_rate, 25);
        assert_eq!(products[1].benefits.len(), 0);
        assert_eq!(products[2].review_count, 4086);
    }

    #[tokio::test]
    async fn test_every_endpoint_serves_the_catalog() {
        let provider = BundledProductProvider::new();
        let list = provider.fetch_payload(&ProductEndpoint::list()).await.unwrap();
        let detail = provider
            .fetch_payload(&ProductEndpoint::detail("2058724538"))
            .await
            .unwrap();
        assert_eq!(list, detail);
    }

    #[tokio::test]
    async fn test_fixture_file_is_served() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"f1","name":"From file","brand":"B","price":1,"discountPrice":1,
                "discountRate":0,"image":"i","link":"l","tags":[],"benefits":[],
                "rating":2.0,"reviewCount":0}}]"#
        )
        .unwrap();

        let provider = BundledProductProvider::new().with_fixture_path(file.path());
        let products: Vec<Product> = provider.request(&ProductEndpoint::list()).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "From file");
    }

    #[tokio::test]
    async fn test_missing_fixture_is_data_loading_failure() {
        let dir = tempfile::tempdir().unwrap();
        let provider =
            BundledProductProvider::new().with_fixture_path(dir.path().join("absent.json"));

        let result = provider.fetch_payload(&ProductEndpoint::list()).await;
        match result {
            Err(ProductError::DataLoading(msg)) => assert!(msg.contains("absent.json")),
            other => panic!("expected DataLoading, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_fixture_is_decoding_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"products": []}}"#).unwrap();

        let provider = BundledProductProvider::new().with_fixture_path(file.path());
        let result = provider
            .request::<Vec<Product>>(&ProductEndpoint::list())
            .await;
        assert!(matches!(result, Err(ProductError::Decoding(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_awaited() {
        let provider = BundledProductProvider::new().with_latency(Duration::from_millis(300));
        assert_eq!(provider.latency(), Duration::from_millis(300));

        let started = tokio::time::Instant::now();
        provider.fetch_payload(&ProductEndpoint::list()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
