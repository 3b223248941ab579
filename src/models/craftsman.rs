use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::craftsman::{Craftsman as DomainCraftsman, NewCraftsman as DomainNewCraftsman};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::craftsmen)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::craftsman::Craftsman`].
pub struct Craftsman {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub specialty: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::craftsmen)]
pub struct NewCraftsman<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub specialty: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Craftsman> for DomainCraftsman {
    type Error = RepositoryError;

    fn try_from(craftsman: Craftsman) -> Result<Self, Self::Error> {
        Ok(Self {
            id: craftsman.id,
            name: craftsman.name,
            phone: craftsman.phone,
            address: craftsman.address,
            specialty: craftsman.specialty,
            status: craftsman.status.parse()?,
            created_at: craftsman.created_at,
            updated_at: craftsman.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCraftsman> for NewCraftsman<'a> {
    fn from(craftsman: &'a DomainNewCraftsman) -> Self {
        Self {
            name: craftsman.name.as_str(),
            phone: craftsman.phone.as_str(),
            address: craftsman.address.as_str(),
            specialty: craftsman.specialty.as_str(),
            status: craftsman.status.as_str(),
            created_at: craftsman.created_at,
            updated_at: craftsman.created_at,
        }
    }
}
