//! Product use cases - the surface screen controllers depend on

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// Catalog operations exposed to screen controllers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductUsecase: Send + Sync {
    /// The full catalog
    async fn list_products(&self) -> ProductResult<Vec<Product>>;

    /// Re-fetch `product` by id.
    ///
    /// Only the id of the argument is used; everything else comes from the
    /// fresh fetch.
    async fn refresh_product(&self, product: &Product) -> ProductResult<Product>;
}

/// Product service backed by a [`ProductRepository`]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: ProductRepository> ProductUsecase for ProductService<R> {
    #[instrument(skip(self))]
    async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.fetch_all().await
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn refresh_product(&self, product: &Product) -> ProductResult<Product> {
        self.repository.fetch_by_id(&product.id).await
    }
}
