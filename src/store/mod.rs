use async_trait::async_trait;

use crate::domain::customer::Customer;

pub mod memory;
pub mod orm;
pub mod sql;

mod mapper;

// Re-export the concrete backends
pub use memory::InMemoryCustomerStore;
pub use orm::OrmCustomerStore;
pub use sql::SqlCustomerStore;

// ============================================================================
// Customer Store Contract
// ============================================================================
//
// One uniform persistence contract, three interchangeable backends:
// - InMemoryCustomerStore: mutex-guarded list, for tests and demos
// - SqlCustomerStore:      hand-written parameterized statements (sqlx)
// - OrmCustomerStore:      entity mapped through sea-orm
//
// Exactly one backend is active at runtime; the selection happens once in
// main and the service layer only ever sees the trait.
//
// ============================================================================

/// Failure at the persistence boundary.
///
/// Row-mapping problems are the only shape this layer interprets; everything
/// else (connection loss, constraint violations, ...) passes through as an
/// opaque database error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to map row column [{column}]")]
    Mapping {
        column: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(anyhow::Error::new(err))
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(anyhow::Error::new(err))
    }
}

/// Uniform persistence operations over customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Every stored record, in whatever order the backend currently holds
    /// them.
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError>;

    /// Empty result (not an error) when the id is absent.
    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError>;

    /// Persists `customer` under a fresh store-assigned id; any id on the
    /// input is ignored. Returns the assigned id.
    async fn insert(&self, customer: Customer) -> Result<i64, StoreError>;

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Idempotent; deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    /// Replaces the stored record matching `customer.id` with the given
    /// name/email/age. A no-op when the id is absent; existence checks are
    /// the caller's responsibility.
    async fn update(&self, customer: &Customer) -> Result<(), StoreError>;
}
