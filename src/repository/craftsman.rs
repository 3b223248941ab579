use diesel::expression_methods::EscapeExpressionMethods;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::casefold;
use crate::domain::craftsman::{Craftsman, NewCraftsman};
use crate::listing::{Collection, LIKE_ESCAPE, ListingFilter, SortOrder};
use crate::models::craftsman::{Craftsman as DbCraftsman, NewCraftsman as DbNewCraftsman};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CraftsmanReader, CraftsmanWriter, DieselRepository, sql_bound};
use crate::schema::craftsmen;

fn filtered(filter: &ListingFilter) -> craftsmen::BoxedQuery<'static, Sqlite> {
    let mut query = craftsmen::table.into_boxed();

    if let Some(status) = filter.status() {
        query = query.filter(craftsmen::status.eq(status.to_string()));
    }

    if let Some(pattern) = filter.search_pattern() {
        query = query.filter(
            casefold(craftsmen::name)
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(casefold(craftsmen::phone)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE))
                .or(casefold(craftsmen::address)
                    .like(pattern)
                    .escape(LIKE_ESCAPE)),
        );
    }

    query
}

impl Collection<Craftsman> for DieselRepository {
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
    ) -> RepositoryResult<Vec<Craftsman>> {
        let mut conn = self.conn()?;

        let query = match sort {
            SortOrder::NewestFirst => {
                filtered(filter).order((craftsmen::created_at.desc(), craftsmen::id.desc()))
            }
            SortOrder::OldestFirst => {
                filtered(filter).order((craftsmen::created_at.asc(), craftsmen::id.asc()))
            }
        };

        query
            .limit(sql_bound(limit))
            .offset(sql_bound(skip))
            .load::<DbCraftsman>(&mut conn)?
            .into_iter()
            .map(Craftsman::try_from)
            .collect()
    }
}

impl CraftsmanReader for DieselRepository {
    fn get_craftsman_by_id(&self, id: i32) -> RepositoryResult<Option<Craftsman>> {
        let mut conn = self.conn()?;
        let craftsman = craftsmen::table
            .find(id)
            .first::<DbCraftsman>(&mut conn)
            .optional()?;

        craftsman.map(Craftsman::try_from).transpose()
    }
}

impl CraftsmanWriter for DieselRepository {
    fn create_craftsman(&self, new_craftsman: &NewCraftsman) -> RepositoryResult<Craftsman> {
        let mut conn = self.conn()?;
        let insertable: DbNewCraftsman = new_craftsman.into();

        let created = diesel::insert_into(craftsmen::table)
            .values(&insertable)
            .get_result::<DbCraftsman>(&mut conn)?;

        created.try_into()
    }

    fn delete_craftsman(&self, id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(craftsmen::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
