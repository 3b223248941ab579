use chrono::Utc;
use diesel::expression_methods::EscapeExpressionMethods;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::casefold;
use crate::domain::order::{NewOrder, Order};
use crate::domain::types::OrderStatus;
use crate::listing::{Collection, LIKE_ESCAPE, ListingFilter, SortOrder};
use crate::models::order::{NewOrder as DbNewOrder, Order as DbOrder};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrderReader, OrderWriter, sql_bound};
use crate::schema::orders;

/// Orders matching `filter`. Search covers customer name, phone and address.
fn filtered(filter: &ListingFilter) -> orders::BoxedQuery<'static, Sqlite> {
    let mut query = orders::table.into_boxed();

    if let Some(status) = filter.status() {
        query = query.filter(orders::status.eq(status.to_string()));
    }

    if let Some(pattern) = filter.search_pattern() {
        query = query.filter(
            casefold(orders::customer_name)
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(casefold(orders::phone)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE))
                .or(casefold(orders::address).like(pattern).escape(LIKE_ESCAPE)),
        );
    }

    query
}

impl Collection<Order> for DieselRepository {
    fn count_matching(&self, filter: &ListingFilter) -> RepositoryResult<u64> {
        let mut conn = self.conn()?;
        let total: i64 = filtered(filter).count().get_result(&mut conn)?;
        Ok(total.max(0) as u64)
    }

    fn find_matching(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> RepositoryResult<Vec<Order>> {
        let mut conn = self.conn()?;

        let query = match sort {
            SortOrder::NewestFirst => {
                filtered(filter).order((orders::created_at.desc(), orders::id.desc()))
            }
            SortOrder::OldestFirst => {
                filtered(filter).order((orders::created_at.asc(), orders::id.asc()))
            }
        };

        query
            .limit(sql_bound(limit))
            .offset(sql_bound(skip))
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>> {
        let mut conn = self.conn()?;
        let order = orders::table
            .find(id)
            .first::<DbOrder>(&mut conn)
            .optional()?;

        order.map(Order::try_from).transpose()
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        let mut conn = self.conn()?;
        let insertable = DbNewOrder::try_from(new_order)?;

        let created = diesel::insert_into(orders::table)
            .values(&insertable)
            .get_result::<DbOrder>(&mut conn)?;

        created.try_into()
    }

    fn update_order_status(&self, id: i32, status: OrderStatus) -> RepositoryResult<Order> {
        let mut conn = self.conn()?;

        let updated = diesel::update(orders::table.find(id))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbOrder>(&mut conn)?;

        updated.try_into()
    }

    fn delete_order(&self, id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(orders::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
