//! Read-only catalogs referenced by the aggregates.

use crate::dto::catalogs::{LanguageDto, PostStatusDto};
use crate::repository::{LanguageReader, PostStatusReader, UnitOfWork};
use crate::services::{InfrastructureError, ServiceResult};

pub fn list_languages<R>(repo: &R) -> ServiceResult<Vec<LanguageDto>>
where
    R: UnitOfWork,
    R::Conn: LanguageReader,
{
    match repo.read(|conn| conn.list_languages()) {
        Ok(languages) => Ok(languages.into_iter().map(LanguageDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list languages: {e}");
            Err(InfrastructureError::from(e))
        }
    }
}

pub fn list_post_statuses<R>(repo: &R) -> ServiceResult<Vec<PostStatusDto>>
where
    R: UnitOfWork,
    R::Conn: PostStatusReader,
{
    match repo.read(|conn| conn.list_post_statuses()) {
        Ok(statuses) => Ok(statuses.into_iter().map(PostStatusDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list post statuses: {e}");
            Err(InfrastructureError::from(e))
        }
    }
}
