use crate::domain::tag::{NewTag, Tag, TagChanges};
use crate::domain::types::TagId;
use crate::dto::tags::TagDto;
use crate::forms::tags::TagFormPayload;
use crate::repository::{EntityStore, LanguageReader, TranslationStore, UnitOfWork};
use crate::services::aggregate;
use crate::services::{Envelope, ServiceResult};

pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<TagDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Tag> + TranslationStore<Tag>,
{
    let tags = aggregate::get_all::<Tag, R>(repo)?;
    Ok(tags.into_iter().map(TagDto::from).collect())
}

pub fn show_tag<R>(tag_id: TagId, repo: &R) -> ServiceResult<Option<TagDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Tag> + TranslationStore<Tag>,
{
    let tag = aggregate::get_one::<Tag, R>(repo, tag_id)?;
    Ok(tag.map(TagDto::from))
}

pub fn create_tag<R>(payload: TagFormPayload, repo: &R) -> ServiceResult<Envelope<TagId>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Tag> + TranslationStore<Tag> + LanguageReader,
{
    aggregate::create::<Tag, R>(repo, NewTag, payload.translations)
}

/// Replace the names of a tag. The tag row itself only gets a new `updated_on`.
pub fn update_tag<R>(
    tag_id: TagId,
    payload: TagFormPayload,
    repo: &R,
) -> ServiceResult<Envelope<TagDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Tag> + TranslationStore<Tag> + LanguageReader,
{
    let updated = aggregate::update::<Tag, R>(repo, tag_id, TagChanges, payload.translations)?;
    Ok(updated.map(TagDto::from))
}

pub fn delete_tag<R>(tag_id: TagId, repo: &R) -> ServiceResult<Envelope<()>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Tag> + TranslationStore<Tag> + LanguageReader,
{
    aggregate::delete::<Tag, R>(repo, tag_id)
}
