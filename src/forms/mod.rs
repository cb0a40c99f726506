use validator::Validate;

use crate::domain::translation::Translation;
use crate::domain::types::TypeConstraintError;
use crate::services::FieldErrors;

pub mod categories;
pub mod posts;
pub mod tags;

/// Field that a constraint violation refers to.
pub(crate) fn constraint_field(err: &TypeConstraintError) -> &'static str {
    match err {
        TypeConstraintError::NonPositiveId(field) | TypeConstraintError::EmptyString(field) => {
            field
        }
        TypeConstraintError::InvalidLanguageCode(_) => "language",
    }
}

/// Validate and convert submitted translation entries.
///
/// Every problem is reported under `translations[<index>].<field>`.
pub(crate) fn parse_translations<T, F>(
    entries: Vec<T>,
    parse: impl Fn(T) -> Result<Translation<F>, TypeConstraintError>,
) -> Result<Vec<Translation<F>>, FieldErrors>
where
    T: Validate,
{
    let mut errors = FieldErrors::new();
    let mut translations = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if let Err(invalid) = entry.validate() {
            for (field, message) in FieldErrors::from(invalid).iter() {
                errors.insert(format!("translations[{index}].{field}"), message);
            }
            continue;
        }

        match parse(entry) {
            Ok(translation) => translations.push(translation),
            Err(err) => errors.insert(
                format!("translations[{index}].{}", constraint_field(&err)),
                err.to_string(),
            ),
        }
    }

    if errors.is_empty() {
        Ok(translations)
    } else {
        Err(errors)
    }
}
