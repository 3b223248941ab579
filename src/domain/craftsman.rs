use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CraftsmanStatus, TypeConstraintError, non_empty};
use crate::listing::Listable;

/// Tradesperson customers can be referred to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Craftsman {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub specialty: String,
    pub status: CraftsmanStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Listable for Craftsman {
    fn listing_status(&self) -> &str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
        ]
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.created_at, self.id)
    }
}

#[derive(Clone, Debug)]
pub struct NewCraftsman {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub specialty: String,
    pub status: CraftsmanStatus,
    pub created_at: NaiveDateTime,
}

impl NewCraftsman {
    pub fn new(
        name: &str,
        phone: &str,
        address: &str,
        specialty: &str,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: non_empty(name)?,
            phone: non_empty(phone)?,
            address: address.trim().to_string(),
            specialty: specialty.trim().to_string(),
            status: CraftsmanStatus::default(),
            created_at: Utc::now().naive_utc(),
        })
    }

    #[must_use]
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}
