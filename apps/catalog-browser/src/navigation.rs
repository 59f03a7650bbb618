//! Route stack for moving between the catalog and product details

use domain_products::Product;
use tracing::debug;

/// A screen the browser can show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Detail(Product),
}

impl Route {
    fn label(&self) -> &str {
        match self {
            Route::Home => "home",
            Route::Detail(_) => "detail",
        }
    }
}

/// Pushed routes on top of the implicit `Home` root
#[derive(Debug)]
pub struct NavigationStack {
    root: Route,
    path: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        Self {
            root: Route::Home,
            path: Vec::new(),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        debug!(route = route.label(), depth = self.path.len() + 1, "navigate");
        self.path.push(route);
    }

    /// Pop the top route. Does nothing at the root.
    pub fn go_back(&mut self) -> Option<Route> {
        self.path.pop()
    }

    pub fn pop_to_root(&mut self) {
        self.path.clear();
    }

    /// Top of the stack, or `Home` when nothing is pushed
    pub fn current(&self) -> &Route {
        self.path.last().unwrap_or(&self.root)
    }

    /// Number of pushed routes
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TestDataBuilder;

    fn product(suffix: &str) -> Product {
        let builder = TestDataBuilder::from_test_name("navigation");
        Product {
            id: builder.product_id(suffix),
            name: builder.name("product", suffix),
            brand: "Nav".to_string(),
            price: 10000,
            discount_price: 8000,
            discount_rate: 20,
            image: String::new(),
            link: String::new(),
            tags: vec![],
            benefits: vec![],
            rating: 4.0,
            review_count: 1,
        }
    }

    #[test]
    fn test_starts_at_home() {
        let stack = NavigationStack::new();
        assert_eq!(stack.current(), &Route::Home);
        assert_eq!(stack.depth(), 0);
        assert!(stack.is_at_root());
    }

    #[test]
    fn test_navigate_pushes_route() {
        let mut stack = NavigationStack::new();
        let detail = Route::Detail(product("a"));

        stack.navigate(detail.clone());

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), &detail);
    }

    #[test]
    fn test_go_back_pops_one_route() {
        let mut stack = NavigationStack::new();
        stack.navigate(Route::Detail(product("a")));
        stack.navigate(Route::Detail(product("b")));

        assert_eq!(stack.go_back(), Some(Route::Detail(product("b"))));
        assert_eq!(stack.current(), &Route::Detail(product("a")));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_go_back_on_empty_stack_is_a_no_op() {
        let mut stack = NavigationStack::new();

        assert_eq!(stack.go_back(), None);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), &Route::Home);
    }

    #[test]
    fn test_pop_to_root_clears_everything() {
        let mut stack = NavigationStack::default();
        for suffix in ["a", "b", "c"] {
            stack.navigate(Route::Detail(product(suffix)));
        }

        stack.pop_to_root();

        assert!(stack.is_at_root());
        assert_eq!(stack.current(), &Route::Home);
    }
}
