use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::{ProductStatus, TypeConstraintError};

/// Body of the product create and update endpoints.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: String,
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub unit: String,
    pub status: Option<String>,
}

impl ProductForm {
    fn status(&self) -> Result<ProductStatus, TypeConstraintError> {
        match self.status.as_deref() {
            Some(status) => status.parse(),
            None => Ok(ProductStatus::default()),
        }
    }

    pub fn to_new_product(&self) -> Result<NewProduct, TypeConstraintError> {
        NewProduct::new(
            &self.name,
            &self.category,
            &self.description,
            self.price,
            &self.unit,
            self.status()?,
        )
    }

    pub fn to_update_product(&self) -> Result<UpdateProduct, TypeConstraintError> {
        UpdateProduct::new(
            &self.name,
            &self.category,
            &self.description,
            self.price,
            &self.unit,
            self.status()?,
        )
    }
}

#[cfg(feature = "server")]
pub use upload::UploadImageForm;

#[cfg(feature = "server")]
mod upload {
    use actix_multipart::form::{MultipartForm, tempfile::TempFile};

    /// Multipart body of the product image upload endpoint.
    #[derive(MultipartForm)]
    pub struct UploadImageForm {
        #[multipart(limit = "10MB")]
        pub image: TempFile,
    }
}
