//! Reconciles the stored translation set of one aggregate with a submission.

use crate::domain::translation::{Aggregate, ReconcilePlan, Translation, duplicate_languages};
use crate::repository::{LanguageReader, TranslationStore};
use crate::services::envelope::{Envelope, FieldErrors};
use crate::services::errors::{ServiceError, ServiceResult};

/// Whether an empty submission is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// At least one translation must be submitted.
    Required,
    /// An empty submission removes every stored translation.
    Optional,
}

/// Make the stored translations of aggregate `id` equal to `translations`.
///
/// Stored languages missing from the submission are deleted, differing ones
/// updated, new ones inserted. Deletes run first so a language is never held
/// twice. Identical rows are left untouched. On success the final set is
/// returned sorted by language.
///
/// Runs on the caller's connection; the caller owns the transaction and must
/// roll it back when the envelope carries an error.
pub fn reconcile<A, S>(
    store: &mut S,
    id: A::Id,
    translations: Vec<Translation<A::Fields>>,
    presence: Presence,
) -> ServiceResult<Envelope<Vec<Translation<A::Fields>>>>
where
    A: Aggregate,
    S: TranslationStore<A> + LanguageReader,
{
    super::capture(apply::<A, S>(store, id, translations, presence))
}

fn apply<A, S>(
    store: &mut S,
    id: A::Id,
    translations: Vec<Translation<A::Fields>>,
    presence: Presence,
) -> Result<Vec<Translation<A::Fields>>, ServiceError>
where
    A: Aggregate,
    S: TranslationStore<A> + LanguageReader,
{
    check_submission(&translations, presence)?;
    check_languages(store, &translations)?;

    let existing = store.list_translations(id)?;
    let plan = ReconcilePlan::new(existing, translations);
    if plan.is_noop() {
        log::debug!("{} {id} translations already up to date", A::NAME);
        return Ok(plan.into_final_set());
    }

    for language in &plan.removed {
        store.delete_translation(id, language)?;
    }
    for translation in &plan.changed {
        store.update_translation(id, translation)?;
    }
    for translation in &plan.added {
        store.insert_translation(id, translation)?;
    }

    log::debug!(
        "Reconciled {} {id} translations: {} removed, {} changed, {} added, {} unchanged",
        A::NAME,
        plan.removed.len(),
        plan.changed.len(),
        plan.added.len(),
        plan.unchanged.len(),
    );

    Ok(plan.into_final_set())
}

fn check_submission<F>(
    translations: &[Translation<F>],
    presence: Presence,
) -> Result<(), FieldErrors> {
    if translations.is_empty() && presence == Presence::Required {
        return Err(FieldErrors::single(
            "translations",
            "at least one translation is required",
        ));
    }

    let duplicates = duplicate_languages(translations);
    if !duplicates.is_empty() {
        let codes = duplicates
            .iter()
            .map(|code| format!("`{code}`"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(FieldErrors::single(
            "translations",
            format!("language {codes} submitted more than once"),
        ));
    }

    Ok(())
}

fn check_languages<F, S>(
    store: &mut S,
    translations: &[Translation<F>],
) -> Result<(), ServiceError>
where
    S: LanguageReader,
{
    let mut unknown = Vec::new();
    for translation in translations {
        if store.find_language(&translation.language)?.is_none() {
            unknown.push(format!("`{}`", translation.language));
        }
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors::single(
            "translations",
            format!("unknown language {}", unknown.join(", ")),
        )
        .into())
    }
}
