use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::customer::Customer;

use super::{CustomerStore, StoreError};

// ============================================================================
// In-Memory Store
// ============================================================================

/// List-backed store for tests and demos.
///
/// All access is serialized through one mutex. Ids come from a counter that
/// only moves forward, so an id is never handed out twice within the store's
/// lifetime, even after deletes.
pub struct InMemoryCustomerStore {
    inner: Mutex<Inner>,
}

struct Inner {
    customers: Vec<Customer>,
    next_id: i64,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                customers: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.inner.lock().await.customers.clone())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().find(|c| c.id == Some(id)).cloned())
    }

    async fn insert(&self, mut customer: Customer) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().await;

        let id = inner.next_id;
        inner.next_id += 1;

        customer.id = Some(id);
        inner.customers.push(customer);

        Ok(id)
    }

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().any(|c| c.email == email))
    }

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().any(|c| c.id == Some(id)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.customers.retain(|c| c.id != Some(id));
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<(), StoreError> {
        let Some(id) = customer.id else {
            return Ok(());
        };

        let mut inner = self.inner.lock().await;
        if let Some(slot) = inner.customers.iter_mut().find(|c| c.id == Some(id)) {
            *slot = customer.clone();
        }

        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
