use sea_orm::entity::prelude::*;

use crate::domain::customer::Customer;

/// The customer table as seen by the ORM backend. Schema matches the
/// hand-written SQL store so the two are interchangeable over one database.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: u32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            age: model.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_converts_into_a_customer() {
        let model = Model {
            id: 1,
            name: "Vicenzo".to_string(),
            email: "vicenzo@vicenzo.com".to_string(),
            age: 19,
        };

        let customer = Customer::from(model);

        assert_eq!(customer.id, Some(1));
        assert_eq!(customer.name, "Vicenzo");
        assert_eq!(customer.email, "vicenzo@vicenzo.com");
        assert_eq!(customer.age, 19);
    }
}
