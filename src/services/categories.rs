use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::CategoryFormPayload;
use crate::repository::{EntityStore, LanguageReader, TranslationStore, UnitOfWork};
use crate::services::aggregate;
use crate::services::{Envelope, ServiceResult};

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Category> + TranslationStore<Category>,
{
    let categories = aggregate::get_all::<Category, R>(repo)?;
    Ok(categories.into_iter().map(CategoryDto::from).collect())
}

pub fn show_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Option<CategoryDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Category> + TranslationStore<Category>,
{
    let category = aggregate::get_one::<Category, R>(repo, category_id)?;
    Ok(category.map(CategoryDto::from))
}

pub fn create_category<R>(
    payload: CategoryFormPayload,
    repo: &R,
) -> ServiceResult<Envelope<CategoryId>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Category> + TranslationStore<Category> + LanguageReader,
{
    let (category, translations) = payload.into_new_category();
    aggregate::create::<Category, R>(repo, category, translations)
}

pub fn update_category<R>(
    category_id: CategoryId,
    payload: CategoryFormPayload,
    repo: &R,
) -> ServiceResult<Envelope<CategoryDto>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Category> + TranslationStore<Category> + LanguageReader,
{
    let (changes, translations) = payload.into_changes();
    let updated = aggregate::update::<Category, R>(repo, category_id, changes, translations)?;
    Ok(updated.map(CategoryDto::from))
}

pub fn delete_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Envelope<()>>
where
    R: UnitOfWork,
    R::Conn: EntityStore<Category> + TranslationStore<Category> + LanguageReader,
{
    aggregate::delete::<Category, R>(repo, category_id)
}
