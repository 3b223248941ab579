use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: i64,
    pub unit: String,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub unit: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
/// Data used when updating a [`Product`] record.
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub unit: &'a str,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = RepositoryError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id,
            name: product.name,
            category: product.category,
            description: product.description,
            price: product.price,
            unit: product.unit,
            status: product.status.parse()?,
            image_url: product.image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str(),
            category: product.category.as_str(),
            description: product.description.as_str(),
            price: product.price,
            unit: product.unit.as_str(),
            status: product.status.as_str(),
            created_at: product.created_at,
            updated_at: product.created_at,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn new(product: &'a DomainUpdateProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            name: product.name.as_str(),
            category: product.category.as_str(),
            description: product.description.as_str(),
            price: product.price,
            unit: product.unit.as_str(),
            status: product.status.as_str(),
            updated_at,
        }
    }
}
