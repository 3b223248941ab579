use chrono::Utc;
use diesel::expression_methods::EscapeExpressionMethods;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::casefold;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::listing::{Collection, LIKE_ESCAPE, ListingFilter, SortOrder};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter, sql_bound};
use crate::schema::products;

/// Products matching `filter`. Search covers name, category and description.
fn filtered(filter: &ListingFilter) -> products::BoxedQuery<'static, Sqlite> {
    let mut query = products::table.into_boxed();

    if let Some(status) = filter.status() {
        query = query.filter(products::status.eq(status.to_string()));
    }

    if let Some(pattern) = filter.search_pattern() {
        query = query.filter(
            casefold(products::name)
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(casefold(products::category)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE))
                .or(casefold(products::description)
                    .like(pattern)
                    .escape(LIKE_ESCAPE)),
        );
    }

    query
}

impl Collection<Product> for DieselRepository {
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
    ) -> RepositoryResult<Vec<Product>> {
        let mut conn = self.conn()?;

        let query = match sort {
            SortOrder::NewestFirst => {
                filtered(filter).order((products::created_at.desc(), products::id.desc()))
            }
            SortOrder::OldestFirst => {
                filtered(filter).order((products::created_at.asc(), products::id.asc()))
            }
        };

        query
            .limit(sql_bound(limit))
            .offset(sql_bound(skip))
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        let product = products::table
            .find(id)
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product.map(Product::try_from).transpose()
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let insertable: DbNewProduct = new_product.into();

        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        created.try_into()
    }

    fn update_product(&self, id: i32, updates: &UpdateProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let changes = DbUpdateProduct::new(updates, Utc::now().naive_utc());

        let updated = diesel::update(products::table.find(id))
            .set(&changes)
            .get_result::<DbProduct>(&mut conn)?;

        updated.try_into()
    }

    fn set_product_image(&self, id: i32, image_url: &str) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;

        let updated = diesel::update(products::table.find(id))
            .set((
                products::image_url.eq(image_url),
                products::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbProduct>(&mut conn)?;

        updated.try_into()
    }

    fn delete_product(&self, id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
