//! Shared test utilities for the ShareIt domain crates
//!
//! - `TestDatabase`: PostgreSQL container with the ShareIt schema applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic names and emails, so parallel tests never
//!   collide on the unique `users.email` constraint
//! - `assertions`: ordering checks for listing endpoints
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let owner = db.create_test_user(&builder.email("owner")).await;
//!     let item_name = builder.name("item", "drill");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed derived from the test name, so reruns produce the same data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("item", "drill"), "test-item-7-drill");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique email for `label`, e.g. `owner-12345@shareit.test`
    pub fn email(&self, label: &str) -> String {
        format!("{}-{}@shareit.test", label, self.seed)
    }
}

pub mod assertions {
    /// Assert that `ids` is sorted the way a listing endpoint promised
    pub fn assert_descending(ids: &[i64], context: &str) {
        assert!(
            ids.windows(2).all(|w| w[0] >= w[1]),
            "{}: expected descending order, got {:?}",
            context,
            ids
        );
    }
}
