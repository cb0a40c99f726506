//! Transactional create/update/delete workflow shared by every aggregate.
//!
//! Each write runs the entity store and the translation reconcile inside a
//! single [`UnitOfWork::transaction`]. A rejection at any step rolls the
//! whole transaction back before it is returned as [`Envelope::Error`].

use crate::domain::translation::{Aggregate, Translated, Translation};
use crate::repository::{
    EntityStore, LanguageReader, RepositoryResult, TranslationStore, UnitOfWork,
};
use crate::services::envelope::{Envelope, Rejection};
use crate::services::errors::{InfrastructureError, ServiceError, ServiceResult};
use crate::services::translations::{Presence, reconcile};

/// Insert an aggregate and its translations. Returns the new id.
pub fn create<A, R>(
    repo: &R,
    new: A::New,
    translations: Vec<Translation<A::Fields>>,
) -> ServiceResult<Envelope<A::Id>>
where
    A: Aggregate,
    R: UnitOfWork,
    R::Conn: EntityStore<A> + TranslationStore<A> + LanguageReader,
{
    let result = repo.transaction(|conn| -> Result<A::Id, ServiceError> {
        let id = conn.create_entity(&new)?;
        reconcile::<A, _>(conn, id, translations, Presence::Required)?.into_result()?;
        Ok(id)
    });

    if let Ok(id) = &result {
        log::info!("Created {} {id}", A::NAME);
    }
    super::settle(&format!("create {}", A::NAME), result)
}

/// Apply `changes` and replace the translation set of aggregate `id`.
///
/// Returns the record as re-read after the commit.
pub fn update<A, R>(
    repo: &R,
    id: A::Id,
    changes: A::Changes,
    translations: Vec<Translation<A::Fields>>,
) -> ServiceResult<Envelope<Translated<A>>>
where
    A: Aggregate,
    R: UnitOfWork,
    R::Conn: EntityStore<A> + TranslationStore<A> + LanguageReader,
{
    let result = repo
        .transaction(|conn| -> Result<(), ServiceError> {
            conn.update_entity(id, &changes)?;
            reconcile::<A, _>(conn, id, translations, Presence::Required)?.into_result()?;
            Ok(())
        })
        .and_then(|()| {
            load::<A, R>(repo, id)?.ok_or_else(|| {
                Rejection::not_found(format!("{} {id} not found", A::NAME)).into()
            })
        });

    super::settle(&format!("update {} {id}", A::NAME), result)
}

/// Remove every translation of aggregate `id`, then the aggregate itself.
pub fn delete<A, R>(repo: &R, id: A::Id) -> ServiceResult<Envelope<()>>
where
    A: Aggregate,
    R: UnitOfWork,
    R::Conn: EntityStore<A> + TranslationStore<A> + LanguageReader,
{
    let result = repo.transaction(|conn| -> Result<(), ServiceError> {
        reconcile::<A, _>(conn, id, Vec::new(), Presence::Optional)?.into_result()?;
        conn.delete_entity(id)?;
        Ok(())
    });

    if result.is_ok() {
        log::info!("Deleted {} {id}", A::NAME);
    }
    super::settle(&format!("delete {} {id}", A::NAME), result)
}

/// Every aggregate with its translations, ordered by id.
pub fn get_all<A, R>(repo: &R) -> ServiceResult<Vec<Translated<A>>>
where
    A: Aggregate,
    R: UnitOfWork,
    R::Conn: EntityStore<A> + TranslationStore<A>,
{
    repo.read(|conn| {
        let entities = conn.list_entities()?;
        entities
            .into_iter()
            .map(|entity| {
                let translations = conn.list_translations(entity.id())?;
                Ok(Translated {
                    entity,
                    translations,
                })
            })
            .collect()
    })
    .map_err(|e| {
        log::error!("Failed to list {} records: {e}", A::NAME);
        InfrastructureError::from(e)
    })
}

/// Aggregate `id` with its translations, or `None` when it does not exist.
pub fn get_one<A, R>(repo: &R, id: A::Id) -> ServiceResult<Option<Translated<A>>>
where
    A: Aggregate,
    R: UnitOfWork,
    R::Conn: EntityStore<A> + TranslationStore<A>,
{
    load::<A, R>(repo, id).map_err(|e| {
        log::error!("Failed to get {} {id}: {e}", A::NAME);
        InfrastructureError::from(e)
    })
}

fn load<A, R>(repo: &R, id: A::Id) -> RepositoryResult<Option<Translated<A>>>
where
    A: Aggregate,
    R: UnitOfWork,
    R::Conn: EntityStore<A> + TranslationStore<A>,
{
    repo.read(|conn| {
        let Some(entity) = conn.fetch_entity(id)? else {
            return Ok(None);
        };
        let translations = conn.list_translations(id)?;
        Ok(Some(Translated {
            entity,
            translations,
        }))
    })
}
