use validator::Validate;

use crate::domain::order::Order;
use crate::domain::types::OrderStatus;
use crate::forms::orders::{CreateOrderForm, UpdateOrderStatusForm};
use crate::listing::{Collection, ListingQuery, ListingRequest, PageResult};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns one page of orders, newest first unless the request says otherwise.
pub fn list_orders<R>(repo: &R, request: &ListingRequest) -> ServiceResult<PageResult<Order>>
where
    R: Collection<Order> + ?Sized,
{
    Ok(ListingQuery::new(repo).list(request)?)
}

pub fn get_order<R>(repo: &R, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the checkout form and persists a new order.
pub fn create_order<R>(repo: &R, form: CreateOrderForm) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate order form: {err}");
        return Err(ServiceError::Form(format!("Invalid order: {err}")));
    }

    let new_order = form.to_new_order()?;
    let order = repo.create_order(&new_order)?;
    log::info!("Created order {} for {}", order.id, order.customer_name);
    Ok(order)
}

pub fn update_order_status<R>(
    repo: &R,
    order_id: i32,
    form: UpdateOrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    let status: OrderStatus = form.status.parse()?;
    let order = repo.update_order_status(order_id, status)?;
    log::info!("Order {order_id} moved to {status}");
    Ok(order)
}

pub fn delete_order<R>(repo: &R, order_id: i32) -> ServiceResult<()>
where
    R: OrderWriter + ?Sized,
{
    repo.delete_order(order_id)?;
    log::info!("Deleted order {order_id}");
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockOrderRepository;

    #[test]
    fn missing_order_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_order_by_id().returning(|_| Ok(None));

        assert!(matches!(get_order(&repo, 5), Err(ServiceError::NotFound)));
    }

    #[test]
    fn unknown_status_is_rejected_before_storage() {
        let mut repo = MockOrderRepository::new();
        repo.expect_update_order_status().never();

        let form = UpdateOrderStatusForm {
            status: "teleported".into(),
        };
        assert!(matches!(
            update_order_status(&repo, 1, form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn deleting_missing_order_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_delete_order()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(delete_order(&repo, 9), Err(ServiceError::NotFound)));
    }

    #[test]
    fn listing_failure_is_not_an_empty_page() {
        let mut repo = MockOrderRepository::new();
        repo.expect_count_matching()
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));
        repo.expect_find_matching().never();

        let err = list_orders(&repo, &ListingRequest::default()).unwrap_err();
        assert!(err.is_unavailable());
    }
}
