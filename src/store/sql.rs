use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;

use crate::domain::customer::Customer;

use super::mapper::customer_from_row;
use super::{CustomerStore, StoreError};

// ============================================================================
// SQL Store
// ============================================================================
//
// Hand-written parameterized statements against SQLite. Every row that comes
// back goes through the row mapper; existence checks are count queries.
//
// ============================================================================

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS customer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INTEGER NOT NULL
)";

pub struct SqlCustomerStore {
    pool: SqlitePool,
}

impl SqlCustomerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and make sure the customer table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new().connect(url).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Batch lookup: stored records whose id is in `ids` AND whose name is
    /// in `names`. Either list being empty makes the intersection empty
    /// without touching the database.
    pub async fn select_by_ids_and_names(
        &self,
        ids: &[i64],
        names: &[String],
    ) -> Result<Vec<Customer>, StoreError> {
        if ids.is_empty() || names.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::new("SELECT id, name, email, age FROM customer WHERE id IN (");
        let mut id_list = query.separated(", ");
        for id in ids {
            id_list.push_bind(*id);
        }
        query.push(") AND name IN (");
        let mut name_list = query.separated(", ");
        for name in names {
            name_list.push_bind(name.as_str());
        }
        query.push(")");

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(customer_from_row).collect()
    }
}

#[async_trait]
impl CustomerStore for SqlCustomerStore {
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query("SELECT id, name, email, age FROM customer")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(customer_from_row).collect()
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query("SELECT id, name, email, age FROM customer WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn insert(&self, customer: Customer) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO customer (name, email, age) VALUES (?, ?, ?)")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(customer.age)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT count(id) FROM customer WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT count(id) FROM customer WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<(), StoreError> {
        // Binding an absent id compares against NULL, which matches no row,
        // so the contract's silent no-op falls out of the statement itself.
        sqlx::query("UPDATE customer SET name = ?, email = ?, age = ? WHERE id = ?")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(customer.age)
            .bind(customer.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
