//! Shared test utilities for the catalog crates
//!
//! - `TestDataBuilder`: deterministic ids and names derived from a seed
//! - `assertions`: assertion helpers with readable failure messages
//! - `wait_until`: poll a condition from async tests without fixed sleeps
//!
//! # Usage
//!
//! ```
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("list_products");
//! let id = builder.product_id("main");
//! assert_eq!(id.len(), 10);
//! assert_eq!(id, builder.product_id("main"));
//! ```

use std::time::Duration;

/// Builder for test data with deterministic values
///
/// The same seed always yields the same ids and names, so failures can be
/// reproduced from the test name alone.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A ten-digit product id, shaped like the ids of the real catalog
    pub fn product_id(&self, suffix: &str) -> String {
        let mut value = self.seed;
        for byte in suffix.bytes() {
            value = value.wrapping_mul(31).wrapping_add(u64::from(byte));
        }
        format!("{:010}", 1_000_000_000 + value % 9_000_000_000)
    }

    /// A readable unique name, e.g. `test-product-12345-main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A price in whole currency units between 1,000 and 1,000,000
    pub fn price(&self, suffix: &str) -> u64 {
        let id: u64 = self
            .product_id(suffix)
            .parse()
            .unwrap_or(1_000_000_000);
        1_000 + (id % 999_001)
    }
}

/// Poll `condition` every few milliseconds until it holds or `timeout` passes.
///
/// Returns whether the condition was met.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that two sequences are equal element by element, in order
    pub fn assert_same_sequence<T: PartialEq + Debug>(actual: &[T], expected: &[T], context: &str) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "{}: expected {} items, got {}",
            context,
            expected.len(),
            actual.len()
        );
        for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert_eq!(a, e, "{}: item {} differs", context, index);
        }
    }
}
