use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::order::{NewOrder, OrderItem};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemForm {
    pub product_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[validate(range(min = 0))]
    pub price: i64,
}

/// Checkout payload submitted by the storefront.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderForm {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub phone: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub address: String,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemForm>,
}

impl CreateOrderForm {
    pub fn to_new_order(self) -> Result<NewOrder, TypeConstraintError> {
        let items = self
            .items
            .into_iter()
            .map(|item| OrderItem {
                product_id: item.product_id,
                name: item.name.trim().to_string(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        NewOrder::new(
            &self.customer_name,
            &self.phone,
            &self.address,
            self.comment.as_deref(),
            items,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusForm {
    pub status: String,
}
