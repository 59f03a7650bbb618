use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::datasource::ProductDataSource;
use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for catalog reads
///
/// The business layer depends on this trait only. Caching, merging several
/// sources or retries belong in an implementation of it, not in the use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List the catalog
    async fn fetch_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a single product by id
    async fn fetch_by_id(&self, id: &str) -> ProductResult<Product>;
}

/// Repository that forwards to a [`ProductDataSource`]
pub struct DataSourceRepository<D: ProductDataSource> {
    data_source: Arc<D>,
}

impl<D: ProductDataSource> DataSourceRepository<D> {
    pub fn new(data_source: D) -> Self {
        Self {
            data_source: Arc::new(data_source),
        }
    }
}

#[async_trait]
impl<D: ProductDataSource> ProductRepository for DataSourceRepository<D> {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> ProductResult<Vec<Product>> {
        self.data_source.fetch_all().await
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: &str) -> ProductResult<Product> {
        self.data_source.fetch_by_id(id).await
    }
}
