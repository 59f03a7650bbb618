//! Transport providers
//!
//! A provider turns an [`ProductEndpoint`] into a raw payload. Decoding into a
//! caller-chosen type lives in [`ProviderExt::request`], so a real HTTP client
//! can replace the bundled one without touching the layers above.

pub mod bundled;
pub mod memory;

pub use bundled::BundledProductProvider;
pub use memory::{FailingProductProvider, StaticProductProvider};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::endpoint::ProductEndpoint;
use crate::error::{ProductError, ProductResult};

/// Trait for catalog transports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductProvider: Send + Sync {
    /// Perform the exchange for `endpoint` and return the response body.
    ///
    /// Fails with [`ProductError::DataLoading`] when the payload cannot be
    /// located or read.
    async fn fetch_payload(&self, endpoint: &ProductEndpoint) -> ProductResult<Vec<u8>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Typed requests on top of any [`ProductProvider`]
#[async_trait]
pub trait ProviderExt: ProductProvider {
    /// Fetch the payload for `endpoint` and decode it as `T`.
    ///
    /// A payload whose shape does not match `T` is [`ProductError::Decoding`].
    async fn request<T>(&self, endpoint: &ProductEndpoint) -> ProductResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let payload = self.fetch_payload(endpoint).await?;

        serde_json::from_slice(&payload).map_err(|e| {
            warn!(
                provider = self.name(),
                endpoint = endpoint.name(),
                error = %e,
                "payload does not match the requested shape"
            );
            ProductError::Decoding(e.to_string())
        })
    }
}

impl<P: ProductProvider + ?Sized> ProviderExt for P {}
