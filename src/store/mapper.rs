use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::customer::Customer;

use super::StoreError;

// ============================================================================
// Row Mapper
// ============================================================================

/// Maps one raw result row to a Customer, reading each column by name.
///
/// This is the only place the raw storage representation meets the domain
/// type; a missing or wrongly-shaped column fails with a mapping error
/// naming the column.
pub(crate) fn customer_from_row(row: &SqliteRow) -> Result<Customer, StoreError> {
    Ok(Customer {
        id: Some(column(row, "id")?),
        name: column(row, "name")?,
        email: column(row, "email")?,
        age: column(row, "age")?,
    })
}

fn column<'r, T>(row: &'r SqliteRow, name: &'static str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(|source| StoreError::Mapping {
        column: name,
        source,
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
