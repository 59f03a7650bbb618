//! Screen controllers
//!
//! Each screen owns a [`FetchCoordinator`] over one use case operation and
//! starts it when the screen appears.

use std::sync::Arc;

use domain_products::{Product, ProductUsecase};
use fetch_coordinator::{FetchCoordinator, FetchState};
use tokio::sync::watch;

/// The catalog list
pub struct CatalogScreen {
    coordinator: FetchCoordinator<Vec<Product>>,
}

impl CatalogScreen {
    pub fn new(usecase: Arc<dyn ProductUsecase>) -> Self {
        let coordinator = FetchCoordinator::new("catalog", move |_| {
            let usecase = Arc::clone(&usecase);
            async move { usecase.list_products().await }
        });
        Self { coordinator }
    }

    /// Load the catalog, replacing any load in flight
    pub fn on_appear(&self) -> u64 {
        self.coordinator.start()
    }

    pub fn state(&self) -> FetchState {
        self.coordinator.state()
    }

    pub async fn settled(&self) -> FetchState {
        self.coordinator.settled().await
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.coordinator.subscribe()
    }

    /// Products from the last successful load; empty before one
    pub fn products(&self) -> Vec<Product> {
        self.coordinator.value().unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<Product> {
        self.products().into_iter().find(|p| p.id == id)
    }

    /// The product to open a detail screen with for `id`.
    ///
    /// An id missing from the list still opens: the first product stands in
    /// under the requested id and the detail refresh applies the lookup
    /// policy to it. `None` only when nothing has been loaded.
    pub fn open(&self, id: &str) -> Option<Product> {
        let mut products = self.products().into_iter();
        let first = products.next()?;
        if first.id == id {
            return Some(first);
        }
        if let Some(found) = products.find(|p| p.id == id) {
            return Some(found);
        }

        let mut placeholder = first;
        placeholder.id = id.to_string();
        Some(placeholder)
    }
}

/// Details of a single product, refreshed on appear
pub struct DetailScreen {
    initial: Product,
    coordinator: FetchCoordinator<Product>,
}

impl DetailScreen {
    pub fn new(usecase: Arc<dyn ProductUsecase>, product: Product) -> Self {
        let fallback = product.clone();
        let coordinator = FetchCoordinator::new("detail", move |current: Option<Product>| {
            let usecase = Arc::clone(&usecase);
            let current = current.unwrap_or_else(|| fallback.clone());
            async move { usecase.refresh_product(&current).await }
        })
        .with_value(product.clone());

        Self {
            initial: product,
            coordinator,
        }
    }

    /// Refresh the product, replacing any refresh in flight
    pub fn on_appear(&self) -> u64 {
        self.coordinator.start()
    }

    pub fn state(&self) -> FetchState {
        self.coordinator.state()
    }

    pub async fn settled(&self) -> FetchState {
        self.coordinator.settled().await
    }

    /// The latest refreshed product, or the one the screen opened with
    pub fn product(&self) -> Product {
        self.coordinator
            .value()
            .unwrap_or_else(|| self.initial.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_products::{
        catalog_service, FailingProductProvider, LookupPolicy, ProductError,
        StaticProductProvider,
    };
    use std::time::Duration;
    use test_utils::{wait_until, TestDataBuilder};

    fn catalog(test_name: &str) -> Vec<Product> {
        let builder = TestDataBuilder::from_test_name(test_name);
        ["a", "b", "c"]
            .iter()
            .map(|suffix| Product {
                id: builder.product_id(suffix),
                name: builder.name("product", suffix),
                brand: "Screens".to_string(),
                price: builder.price(suffix),
                discount_price: builder.price(suffix),
                discount_rate: 0,
                image: String::new(),
                link: String::new(),
                tags: vec![],
                benefits: vec![],
                rating: 4.2,
                review_count: 3,
            })
            .collect()
    }

    fn serving(products: &[Product], policy: LookupPolicy) -> Arc<dyn ProductUsecase> {
        let provider = StaticProductProvider::from_products(products).unwrap();
        Arc::new(catalog_service(provider, policy))
    }

    fn failing() -> Arc<dyn ProductUsecase> {
        Arc::new(catalog_service(
            FailingProductProvider::data_loading("offline"),
            LookupPolicy::default(),
        ))
    }

    #[tokio::test]
    async fn test_catalog_screen_loads_products() {
        let products = catalog("catalog_loads");
        let screen = CatalogScreen::new(serving(&products, LookupPolicy::default()));

        assert_eq!(screen.state(), FetchState::Loading);
        assert!(screen.products().is_empty());

        screen.on_appear();
        assert_eq!(screen.settled().await, FetchState::Normal);
        assert_eq!(screen.products(), products);
        assert_eq!(screen.find(&products[2].id), Some(products[2].clone()));
        assert_eq!(screen.find("nope"), None);
    }

    #[tokio::test]
    async fn test_catalog_screen_reports_errors() {
        let screen = CatalogScreen::new(failing());
        let rx = screen.subscribe();

        screen.on_appear();
        assert!(wait_until(Duration::from_secs(2), || rx.borrow().is_settled()).await);

        assert!(screen.state().error_message().unwrap().contains("offline"));
        assert!(screen.products().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_screen_reappear_restarts() {
        let products = catalog("catalog_reappear");
        let screen = CatalogScreen::new(serving(&products, LookupPolicy::default()));

        let first = screen.on_appear();
        let second = screen.on_appear();
        assert!(second > first);

        assert_eq!(screen.settled().await, FetchState::Normal);
        assert_eq!(screen.products().len(), 3);
    }

    #[tokio::test]
    async fn test_detail_screen_replaces_product_on_refresh() {
        let products = catalog("detail_refresh");
        let mut stale = products[1].clone();
        stale.name = "stale".to_string();

        let screen = DetailScreen::new(serving(&products, LookupPolicy::Strict), stale.clone());
        assert_eq!(screen.product(), stale);

        screen.on_appear();
        assert_eq!(screen.settled().await, FetchState::Normal);
        assert_eq!(screen.product(), products[1]);
    }

    #[tokio::test]
    async fn test_detail_screen_keeps_product_on_error() {
        let product = catalog("detail_error").remove(0);
        let screen = DetailScreen::new(failing(), product.clone());

        screen.on_appear();
        let state = screen.settled().await;

        assert!(matches!(state, FetchState::Error(_)));
        assert_eq!(screen.product(), product);
    }

    async fn open_and_refresh(products: &[Product], id: &str, policy: LookupPolicy) -> DetailScreen {
        let usecase = serving(products, policy);
        let catalog = CatalogScreen::new(Arc::clone(&usecase));
        catalog.on_appear();
        catalog.settled().await;

        let opened = catalog.open(id).expect("catalog is not empty");
        assert_eq!(opened.id, id);

        let detail = DetailScreen::new(usecase, opened);
        detail.on_appear();
        detail.settled().await;
        detail
    }

    #[tokio::test]
    async fn test_open_known_id_returns_that_product() {
        let products = catalog("open_known");
        let screen = CatalogScreen::new(serving(&products, LookupPolicy::default()));
        assert_eq!(screen.open(&products[1].id), None);

        screen.on_appear();
        screen.settled().await;
        assert_eq!(screen.open(&products[1].id), Some(products[1].clone()));
    }

    #[tokio::test]
    async fn test_unknown_id_under_fallback_policy_serves_first_product() {
        let products = catalog("open_unknown_fallback");
        let detail = open_and_refresh(&products, "zzz", LookupPolicy::FallbackToFirst).await;

        assert_eq!(detail.state(), FetchState::Normal);
        assert_eq!(detail.product(), products[0]);
    }

    #[tokio::test]
    async fn test_unknown_id_under_strict_policy_is_not_found() {
        let products = catalog("open_unknown_strict");
        let detail = open_and_refresh(&products, "zzz", LookupPolicy::Strict).await;

        assert_eq!(
            detail.state(),
            FetchState::Error(ProductError::NotFound("zzz".into()).to_string())
        );
    }

    #[tokio::test]
    async fn test_known_id_is_identical_under_both_policies() {
        let products = catalog("open_known_policies");
        for policy in [LookupPolicy::FallbackToFirst, LookupPolicy::Strict] {
            let detail = open_and_refresh(&products, &products[2].id, policy).await;
            assert_eq!(detail.product(), products[2]);
        }
    }

    #[tokio::test]
    async fn test_detail_screen_falls_back_to_first_for_unknown_id() {
        let products = catalog("detail_fallback");
        let mut unknown = products[2].clone();
        unknown.id = "0".to_string();

        let screen = DetailScreen::new(serving(&products, LookupPolicy::FallbackToFirst), unknown);
        screen.on_appear();
        screen.settled().await;

        assert_eq!(screen.product(), products[0]);
    }
}
