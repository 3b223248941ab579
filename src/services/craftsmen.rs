use validator::Validate;

use crate::domain::craftsman::Craftsman;
use crate::forms::craftsmen::CraftsmanForm;
use crate::listing::{Collection, ListingQuery, ListingRequest, PageResult};
use crate::repository::{CraftsmanReader, CraftsmanWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_craftsmen<R>(repo: &R, request: &ListingRequest) -> ServiceResult<PageResult<Craftsman>>
where
    R: Collection<Craftsman> + ?Sized,
{
    Ok(ListingQuery::new(repo).list(request)?)
}

pub fn get_craftsman<R>(repo: &R, craftsman_id: i32) -> ServiceResult<Craftsman>
where
    R: CraftsmanReader + ?Sized,
{
    repo.get_craftsman_by_id(craftsman_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_craftsman<R>(repo: &R, form: CraftsmanForm) -> ServiceResult<Craftsman>
where
    R: CraftsmanWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate craftsman form: {err}");
        return Err(ServiceError::Form(format!("Invalid craftsman: {err}")));
    }

    let craftsman = repo.create_craftsman(&form.to_new_craftsman()?)?;
    log::info!("Registered craftsman {}", craftsman.id);
    Ok(craftsman)
}

pub fn delete_craftsman<R>(repo: &R, craftsman_id: i32) -> ServiceResult<()>
where
    R: CraftsmanWriter + ?Sized,
{
    repo.delete_craftsman(craftsman_id)?;
    Ok(())
}
