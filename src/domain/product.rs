use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductStatus, TypeConstraintError, non_empty};
use crate::listing::Listable;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Price per unit in minor currency units.
    pub price: i64,
    /// Unit of sale, e.g. "bag" or "m2".
    pub unit: String,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Listable for Product {
    fn listing_status(&self) -> &str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.category.as_str(),
            self.description.as_str(),
        ]
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.created_at, self.id)
    }
}

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: i64,
    pub unit: String,
    pub status: ProductStatus,
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    pub fn new(
        name: &str,
        category: &str,
        description: &str,
        price: i64,
        unit: &str,
        status: ProductStatus,
    ) -> Result<Self, TypeConstraintError> {
        if price < 0 {
            return Err(TypeConstraintError::NegativeAmount);
        }
        Ok(Self {
            name: non_empty(name)?,
            category: category.trim().to_string(),
            description: description.trim().to_string(),
            price,
            unit: unit.trim().to_string(),
            status,
            created_at: Utc::now().naive_utc(),
        })
    }

    #[must_use]
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}

#[derive(Clone, Debug)]
pub struct UpdateProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: i64,
    pub unit: String,
    pub status: ProductStatus,
}

impl UpdateProduct {
    pub fn new(
        name: &str,
        category: &str,
        description: &str,
        price: i64,
        unit: &str,
        status: ProductStatus,
    ) -> Result<Self, TypeConstraintError> {
        let new = NewProduct::new(name, category, description, price, unit, status)?;
        Ok(Self {
            name: new.name,
            category: new.category,
            description: new.description,
            price: new.price,
            unit: new.unit,
            status: new.status,
        })
    }
}
