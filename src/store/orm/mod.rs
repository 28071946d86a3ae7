use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, Schema, TryIntoModel,
};

use crate::domain::customer::Customer;

use super::{CustomerStore, StoreError};

pub mod entity;

use entity::Entity as CustomerEntity;

// ============================================================================
// ORM Store
// ============================================================================
//
// Each operation delegates to the mapped entity. Insert and update both go
// through the ActiveModel save path; the distinction between the two is made
// entirely by the caller: insert leaves the primary key unset, update
// supplies an existing one.
//
// ============================================================================

pub struct OrmCustomerStore {
    db: DatabaseConnection,
}

impl OrmCustomerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connect to `url` and make sure the customer table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let db = Database::connect(url).await?;
        let store = Self::new(db);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), StoreError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(CustomerEntity);
        table.if_not_exists();

        self.db.execute(backend.build(&table)).await?;
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for OrmCustomerStore {
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError> {
        let models = CustomerEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let model = CustomerEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Customer::from))
    }

    async fn insert(&self, customer: Customer) -> Result<i64, StoreError> {
        // The primary key stays NotSet so save() takes the insert path and
        // the database assigns a fresh id.
        let model = entity::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(customer.name),
            email: ActiveValue::Set(customer.email),
            age: ActiveValue::Set(customer.age),
        }
        .save(&self.db)
        .await?
        .try_into_model()?;

        Ok(model.id)
    }

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError> {
        let count = CustomerEntity::find()
            .filter(entity::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError> {
        let count = CustomerEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        CustomerEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<(), StoreError> {
        let Some(id) = customer.id else {
            return Ok(());
        };

        let model = entity::ActiveModel {
            id: ActiveValue::Set(id),
            name: ActiveValue::Set(customer.name.clone()),
            email: ActiveValue::Set(customer.email.clone()),
            age: ActiveValue::Set(customer.age),
        };

        match model.save(&self.db).await {
            Ok(_) => Ok(()),
            // Saving against a row that is not there is a no-op by contract.
            Err(DbErr::RecordNotUpdated) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectOptions;

    async fn store() -> OrmCustomerStore {
        // One pooled connection: each connection to sqlite::memory: would
        // otherwise get its own private database.
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);

        let db = Database::connect(options).await.unwrap();
        let store = OrmCustomerStore::new(db);
        store.init_schema().await.unwrap();
        store
    }

    fn customer(name: &str, email: &str, age: u32) -> Customer {
        Customer::new(name, email, age)
    }

    #[tokio::test]
    async fn inserted_record_reads_back_with_its_id() {
        let store = store().await;
        let input = customer("Alex", "alex@example.com", 21);

        let id = store.insert(input.clone()).await.unwrap();
        let stored = store.select_by_id(id).await.unwrap().unwrap();

        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.name, input.name);
        assert_eq!(stored.email, input.email);
        assert_eq!(stored.age, input.age);
    }

    #[tokio::test]
    async fn select_by_id_on_an_absent_id_is_none() {
        let store = store().await;

        assert!(store.select_by_id(-1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn select_all_returns_every_record() {
        let store = store().await;
        store
            .insert(customer("Alex", "alex@example.com", 21))
            .await
            .unwrap();
        store
            .insert(customer("Jamila", "jamila@example.com", 21))
            .await
            .unwrap();

        assert_eq!(store.select_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn insert_ignores_a_supplied_id() {
        let store = store().await;
        let mut input = customer("Alex", "alex@example.com", 21);
        input.id = Some(42);

        let id = store.insert(input).await.unwrap();

        assert_eq!(id, 1);
        assert!(store.select_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_a_delete() {
        let store = store().await;
        let first = store
            .insert(customer("Alex", "alex@example.com", 21))
            .await
            .unwrap();
        store.delete_by_id(first).await.unwrap();

        let second = store
            .insert(customer("Jamila", "jamila@example.com", 21))
            .await
            .unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn exists_checks_track_stored_records() {
        let store = store().await;

        assert!(!store.exists_with_email("alex@example.com").await.unwrap());
        assert!(!store.exists_with_id(1).await.unwrap());

        let id = store
            .insert(customer("Alex", "alex@example.com", 21))
            .await
            .unwrap();

        assert!(store.exists_with_email("alex@example.com").await.unwrap());
        assert!(store.exists_with_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store().await;
        let id = store
            .insert(customer("Alex", "alex@example.com", 21))
            .await
            .unwrap();

        store.delete_by_id(id).await.unwrap();
        store.delete_by_id(id).await.unwrap();

        assert!(store.select_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_the_matching_record() {
        let store = store().await;
        let id = store
            .insert(customer("Alex", "alex@example.com", 21))
            .await
            .unwrap();

        let replacement = Customer {
            id: Some(id),
            name: "Vicenzo".to_string(),
            email: "vicenzo@vicenzo.com".to_string(),
            age: 23,
        };
        store.update(&replacement).await.unwrap();

        assert_eq!(store.select_by_id(id).await.unwrap().unwrap(), replacement);
    }

    #[tokio::test]
    async fn update_on_an_absent_id_is_a_noop() {
        let store = store().await;

        let ghost = Customer {
            id: Some(7),
            name: "Nobody".to_string(),
            email: "nobody@example.com".to_string(),
            age: 30,
        };
        store.update(&ghost).await.unwrap();

        assert!(store.select_all().await.unwrap().is_empty());
    }
}
