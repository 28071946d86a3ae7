use std::sync::Arc;

use crate::store::CustomerStore;

use super::errors::CustomerError;
use super::model::{Customer, CustomerPatch, CustomerRegistration};

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: request → invariant checks → store operation → domain result
//
// The service depends only on the CustomerStore contract; which backend is
// behind it is decided once at startup and never inspected here.
//
// ============================================================================

pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.store.select_all().await?)
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer, CustomerError> {
        self.store
            .select_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Register a new customer. The store assigns the id.
    pub async fn add_customer(
        &self,
        request: CustomerRegistration,
    ) -> Result<Customer, CustomerError> {
        if self.store.exists_with_email(&request.email).await? {
            return Err(CustomerError::DuplicateEmail);
        }

        let mut customer = Customer::new(request.name, request.email, request.age);
        let id = self.store.insert(customer.clone()).await?;
        customer.id = Some(id);

        tracing::debug!(id, "registered customer");
        Ok(customer)
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), CustomerError> {
        if !self.store.exists_with_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        self.store.delete_by_id(id).await?;

        tracing::debug!(id, "deleted customer");
        Ok(())
    }

    /// Partial update: only supplied fields that differ from the stored
    /// record are applied. A request that changes nothing is rejected.
    pub async fn update_customer(
        &self,
        id: i64,
        patch: CustomerPatch,
    ) -> Result<Customer, CustomerError> {
        let current = self.get_customer(id).await?;

        let (merged, changed) = patch.apply_to(&current);

        // The new email may already belong to any stored record, not just
        // the one being updated.
        if merged.email != current.email && self.store.exists_with_email(&merged.email).await? {
            return Err(CustomerError::DuplicateEmail);
        }

        if !changed {
            return Err(CustomerError::NoChanges);
        }

        self.store.update(&merged).await?;

        tracing::debug!(id, "updated customer");
        Ok(merged)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
