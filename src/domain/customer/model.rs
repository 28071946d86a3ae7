use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Model
// ============================================================================

/// A customer record. The id is assigned by the active store on insert and
/// never changes afterwards; it is absent on records that have not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl Customer {
    /// A customer that has not been persisted yet (no id).
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

/// Registration payload for a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub name: String,
    pub email: String,
    pub age: u32,
}

/// Partial-update payload. Fields left out keep their stored value; a blank
/// string counts as left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl CustomerPatch {
    /// Merge this patch into `current`, returning the merged record and
    /// whether any field actually changed. A string field is applied only
    /// when it is non-blank and differs from the stored value; `age` only
    /// when present and different.
    pub fn apply_to(&self, current: &Customer) -> (Customer, bool) {
        let mut merged = current.clone();
        let mut changed = false;

        if let Some(name) = provided(&self.name) {
            if name != merged.name {
                merged.name = name.to_string();
                changed = true;
            }
        }

        if let Some(email) = provided(&self.email) {
            if email != merged.email {
                merged.email = email.to_string();
                changed = true;
            }
        }

        if let Some(age) = self.age {
            if age != merged.age {
                merged.age = age;
                changed = true;
            }
        }

        (merged, changed)
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Unit Tests
// ============================================================================
