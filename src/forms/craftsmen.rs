use serde::Deserialize;
use validator::Validate;

use crate::domain::craftsman::NewCraftsman;
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CraftsmanForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub address: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub specialty: String,
}

impl CraftsmanForm {
    pub fn to_new_craftsman(&self) -> Result<NewCraftsman, TypeConstraintError> {
        NewCraftsman::new(&self.name, &self.phone, &self.address, &self.specialty)
    }
}
