//! Data source: domain-shaped access over a transport provider

use async_trait::async_trait;
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{debug, instrument};

use crate::endpoint::ProductEndpoint;
use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::provider::{ProductProvider, ProviderExt};

/// What `fetch_by_id` returns when the id is not in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LookupPolicy {
    /// Return the first product of the catalog
    #[default]
    #[strum(serialize = "fallback")]
    FallbackToFirst,
    /// Fail with [`ProductError::NotFound`]
    Strict,
}

/// Trait for catalog data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductDataSource: Send + Sync {
    /// The whole catalog, in provider order
    async fn fetch_all(&self) -> ProductResult<Vec<Product>>;

    /// A single product by id
    async fn fetch_by_id(&self, id: &str) -> ProductResult<Product>;
}

/// Data source that reads the catalog through a [`ProductProvider`].
///
/// There is no dedicated detail request: `fetch_by_id` scans the list
/// response for the first matching id.
pub struct ProviderDataSource<P: ProductProvider> {
    provider: Arc<P>,
    policy: LookupPolicy,
}

impl<P: ProductProvider> ProviderDataSource<P> {
    pub fn new(provider: P) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    /// Share a provider that is already held elsewhere
    pub fn from_arc(provider: Arc<P>) -> Self {
        Self {
            provider,
            policy: LookupPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }
}

#[async_trait]
impl<P: ProductProvider> ProductDataSource for ProviderDataSource<P> {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> ProductResult<Vec<Product>> {
        let products: Vec<Product> = self.provider.request(&ProductEndpoint::list()).await?;
        debug!(
            provider = self.provider.name(),
            count = products.len(),
            "catalog fetched"
        );
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: &str) -> ProductResult<Product> {
        let products = self.fetch_all().await?;
        select_product(products, id, self.policy)
    }
}

/// Pick the first product with `id`, applying `policy` when there is none.
///
/// An empty catalog is always [`ProductError::NotFound`].
pub fn select_product(
    products: Vec<Product>,
    id: &str,
    policy: LookupPolicy,
) -> ProductResult<Product> {
    let mut first = None;

    for product in products {
        if product.id == id {
            return Ok(product);
        }
        if first.is_none() {
            first = Some(product);
        }
    }

    match (policy, first) {
        (LookupPolicy::FallbackToFirst, Some(product)) => {
            debug!(requested = id, served = %product.id, "id not in catalog, serving first product");
            Ok(product)
        }
        _ => Err(ProductError::NotFound(id.to_string())),
    }
}
