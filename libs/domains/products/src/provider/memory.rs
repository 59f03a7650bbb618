//! In-memory providers for tests and local wiring

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::ProductProvider;
use crate::endpoint::ProductEndpoint;
use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Serves a fixed payload and counts requests
#[derive(Debug, Clone)]
pub struct StaticProductProvider {
    payload: Arc<Vec<u8>>,
    requests: Arc<AtomicUsize>,
}

impl StaticProductProvider {
    /// Serve `products` encoded as the catalog payload
    pub fn from_products(products: &[Product]) -> ProductResult<Self> {
        Ok(Self::from_bytes(serde_json::to_vec(products)?))
    }

    /// Serve raw bytes verbatim, e.g. a deliberately malformed payload
    pub fn from_bytes(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: Arc::new(payload.into()),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductProvider for StaticProductProvider {
    async fn fetch_payload(&self, _endpoint: &ProductEndpoint) -> ProductResult<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.as_ref().clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Fails every request with the configured error
#[derive(Debug, Clone)]
pub struct FailingProductProvider {
    error: ProductError,
    requests: Arc<AtomicUsize>,
}

impl FailingProductProvider {
    pub fn new(error: ProductError) -> Self {
        Self {
            error,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail with [`ProductError::DataLoading`]
    pub fn data_loading(message: impl Into<String>) -> Self {
        Self::new(ProductError::DataLoading(message.into()))
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductProvider for FailingProductProvider {
    async fn fetch_payload(&self, _endpoint: &ProductEndpoint) -> ProductResult<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
