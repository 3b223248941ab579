use validator::Validate;

use crate::domain::product::Product;
use crate::forms::products::ProductForm;
use crate::listing::{Collection, ListingQuery, ListingRequest, PageResult};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_products<R>(repo: &R, request: &ListingRequest) -> ServiceResult<PageResult<Product>>
where
    R: Collection<Product> + ?Sized,
{
    Ok(ListingQuery::new(repo).list(request)?)
}

pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

fn validate(form: &ProductForm) -> ServiceResult<()> {
    form.validate().map_err(|err| {
        log::error!("Failed to validate product form: {err}");
        ServiceError::Form(format!("Invalid product: {err}"))
    })
}

pub fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    validate(&form)?;
    let product = repo.create_product(&form.to_new_product()?)?;
    log::info!("Created product {} ({})", product.id, product.name);
    Ok(product)
}

pub fn update_product<R>(repo: &R, product_id: i32, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    validate(&form)?;
    Ok(repo.update_product(product_id, &form.to_update_product()?)?)
}

pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id)?;
    log::info!("Deleted product {product_id}");
    Ok(())
}

/// Processes an uploaded image, stores it and links it to the product.
#[cfg(feature = "server")]
pub fn attach_product_image<R>(
    repo: &R,
    processor: &dyn crate::imaging::ImageProcessor,
    store: &crate::imaging::UploadStore,
    product_id: i32,
    bytes: &[u8],
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let previous = get_product(repo, product_id)?.image_url;

    let processed = processor
        .process(bytes)
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let url = store
        .save(&processed)
        .map_err(|err| ServiceError::Upload(err.to_string()))?;

    let product = match repo.set_product_image(product_id, &url) {
        Ok(product) => product,
        Err(err) => {
            if let Err(cleanup) = store.remove(&url) {
                log::warn!("Failed to remove unlinked image {url}: {cleanup}");
            }
            return Err(err.into());
        }
    };
    log::info!("Stored image for product {product_id} at {url}");

    if let Some(previous) = previous
        && previous != url
        && let Err(err) = store.remove(&previous)
    {
        log::warn!("Failed to remove replaced image {previous}: {err}");
    }

    Ok(product)
}
