//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::craftsman::{Craftsman, NewCraftsman};
use crate::domain::order::{NewOrder, Order};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::OrderStatus;
use crate::listing::{Collection, ListingFilter, SortOrder};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CraftsmanReader, CraftsmanWriter, OrderReader, OrderWriter, ProductReader, ProductWriter,
};

mock! {
    pub OrderRepository {}

    impl Collection<Order> for OrderRepository {
        fn count_matching(&self, filter: &ListingFilter) -> RepositoryResult<u64>;
        fn find_matching(
            &self,
            filter: &ListingFilter,
            sort: SortOrder,
            skip: u64,
            limit: u64,
        ) -> RepositoryResult<Vec<Order>>;
    }

    impl OrderReader for OrderRepository {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    }

    impl OrderWriter for OrderRepository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, id: i32, status: OrderStatus) -> RepositoryResult<Order>;
        fn delete_order(&self, id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductRepository {}

    impl Collection<Product> for ProductRepository {
        fn count_matching(&self, filter: &ListingFilter) -> RepositoryResult<u64>;
        fn find_matching(
            &self,
            filter: &ListingFilter,
            sort: SortOrder,
            skip: u64,
            limit: u64,
        ) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductReader for ProductRepository {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    }

    impl ProductWriter for ProductRepository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn set_product_image(&self, id: i32, image_url: &str) -> RepositoryResult<Product>;
        fn delete_product(&self, id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CraftsmanRepository {}

    impl Collection<Craftsman> for CraftsmanRepository {
        fn count_matching(&self, filter: &ListingFilter) -> RepositoryResult<u64>;
        fn find_matching(
            &self,
            filter: &ListingFilter,
            sort: SortOrder,
            skip: u64,
            limit: u64,
        ) -> RepositoryResult<Vec<Craftsman>>;
    }

    impl CraftsmanReader for CraftsmanRepository {
        fn get_craftsman_by_id(&self, id: i32) -> RepositoryResult<Option<Craftsman>>;
    }

    impl CraftsmanWriter for CraftsmanRepository {
        fn create_craftsman(&self, new_craftsman: &NewCraftsman) -> RepositoryResult<Craftsman>;
        fn delete_craftsman(&self, id: i32) -> RepositoryResult<()>;
    }
}
