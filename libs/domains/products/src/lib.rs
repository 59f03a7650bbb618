//! Products Domain
//!
//! Read-only access to the product catalog, layered so that each stage can be
//! replaced on its own.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Usecase   │  ← Operations screen controllers call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Business-facing seam (caching would go here)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ DataSource  │  ← Domain-shaped reads, id lookup policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Provider   │  ← Transport (bundled fixture today)
//! └─────────────┘
//! ```
//!
//! Errors travel up unchanged; nothing below the caller of the use case
//! catches them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{catalog_service, BundledProductProvider, LookupPolicy, ProductUsecase};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = catalog_service(BundledProductProvider::new(), LookupPolicy::default());
//!
//! let products = service.list_products().await?;
//! let refreshed = service.refresh_product(&products[0]).await?;
//! # Ok(())
//! # }
//! ```

pub mod datasource;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod provider;
pub mod repository;
pub mod usecase;

// Re-export commonly used types
pub use datasource::{select_product, LookupPolicy, ProductDataSource, ProviderDataSource};
pub use endpoint::{Endpoint, ProductEndpoint};
pub use error::{ProductError, ProductResult};
pub use models::{DetailRequest, ListRequest, Product};
pub use provider::{
    BundledProductProvider, FailingProductProvider, ProductProvider, ProviderExt,
    StaticProductProvider,
};
pub use repository::{DataSourceRepository, ProductRepository};
pub use usecase::{ProductService, ProductUsecase};

/// The default service stack over `provider`
pub type CatalogService<P> = ProductService<DataSourceRepository<ProviderDataSource<P>>>;

/// Wire provider → data source → repository → service
pub fn catalog_service<P: ProductProvider>(provider: P, policy: LookupPolicy) -> CatalogService<P> {
    let data_source = ProviderDataSource::new(provider).with_policy(policy);
    ProductService::new(DataSourceRepository::new(data_source))
}
