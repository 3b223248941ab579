use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{OrderStatus, TypeConstraintError, non_empty, optional_text};
use crate::listing::Listable;

/// Single line of an order. Prices are in minor currency units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Option<i32>,
    pub name: String,
    pub quantity: u32,
    pub price: i64,
}

impl OrderItem {
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub comment: Option<String>,
    pub items: Vec<OrderItem>,
    /// Sum of the item subtotals in minor currency units.
    pub total: i64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Listable for Order {
    fn listing_status(&self) -> &str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.customer_name.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
        ]
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.created_at, self.id)
    }
}

#[derive(Clone, Debug)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub comment: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: i64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

impl NewOrder {
    /// Builds a new order in the [`OrderStatus::New`] state, trimming text
    /// fields and computing the total from the items.
    pub fn new(
        customer_name: &str,
        phone: &str,
        address: &str,
        comment: Option<&str>,
        items: Vec<OrderItem>,
    ) -> Result<Self, TypeConstraintError> {
        if items.iter().any(|item| item.price < 0) {
            return Err(TypeConstraintError::NegativeAmount);
        }
        let total = items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.subtotal()));

        Ok(Self {
            customer_name: non_empty(customer_name)?,
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            comment: optional_text(comment),
            items,
            total,
            status: OrderStatus::New,
            created_at: Utc::now().naive_utc(),
        })
    }

    /// Overrides the creation time, e.g. when importing historical orders.
    #[must_use]
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}
