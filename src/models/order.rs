use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderItem};
use crate::domain::types::OrderStatus;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::order::Order`].
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub comment: Option<String>,
    /// JSON array of order items.
    pub items: String,
    pub total: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
/// Insertable form of [`Order`].
pub struct NewOrder<'a> {
    pub customer_name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub comment: Option<&'a str>,
    pub items: String,
    pub total: i64,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Order> for DomainOrder {
    type Error = RepositoryError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_str(&order.items)?;
        let status: OrderStatus = order.status.parse()?;
        Ok(Self {
            id: order.id,
            customer_name: order.customer_name,
            phone: order.phone,
            address: order.address,
            comment: order.comment,
            items,
            total: order.total,
            status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewOrder> for NewOrder<'a> {
    type Error = RepositoryError;

    fn try_from(order: &'a DomainNewOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_name: order.customer_name.as_str(),
            phone: order.phone.as_str(),
            address: order.address.as_str(),
            comment: order.comment.as_deref(),
            items: serde_json::to_string(&order.items)?,
            total: order.total,
            status: order.status.as_str(),
            created_at: order.created_at,
            updated_at: order.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn stored_order_into_domain() {
        let now = Utc::now().naive_utc();
        let db_order = Order {
            id: 7,
            customer_name: "Ivan".into(),
            phone: "123".into(),
            address: "Main st.".into(),
            comment: None,
            items: r#"[{"productId":3,"name":"Sand","quantity":2,"price":500}]"#.into(),
            total: 1000,
            status: "shipped".into(),
            created_at: now,
            updated_at: now,
        };
        let order: DomainOrder = db_order.try_into().unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.items[0].product_id, Some(3));
        assert_eq!(order.items[0].subtotal(), 1000);
    }

    #[test]
    fn corrupt_items_are_reported() {
        let now = Utc::now().naive_utc();
        let db_order = Order {
            id: 1,
            customer_name: "Ivan".into(),
            phone: String::new(),
            address: String::new(),
            comment: None,
            items: "not json".into(),
            total: 0,
            status: "new".into(),
            created_at: now,
            updated_at: now,
        };
        let result: Result<DomainOrder, _> = db_order.try_into();
        assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
    }

    #[test]
    fn domain_new_order_serializes_items() {
        let domain = DomainNewOrder::new(
            "Ivan",
            "123",
            "Main st.",
            Some("call first"),
            vec![OrderItem {
                product_id: None,
                name: "Sand".into(),
                quantity: 1,
                price: 500,
            }],
        )
        .unwrap();
        let insertable = NewOrder::try_from(&domain).unwrap();
        assert_eq!(insertable.status, "new");
        assert_eq!(insertable.comment, Some("call first"));
        assert!(insertable.items.contains("\"name\":\"Sand\""));
    }
}
