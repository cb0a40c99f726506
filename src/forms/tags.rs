use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::tag::TagText;
use crate::domain::translation::Translation;
use crate::domain::types::{LanguageCode, TagName};
use crate::forms::parse_translations;
use crate::services::FieldErrors;

#[derive(Debug, Deserialize, Validate)]
pub struct TagTranslationForm {
    #[validate(length(min = 2, max = 35, message = "must be a language code such as `en`"))]
    pub language: String,
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters long"))]
    pub name: String,
}

/// JSON body accepted by the tag create and update endpoints.
///
/// Field rules live on the translation entries.
#[derive(Debug, Deserialize)]
pub struct TagForm {
    #[serde(default)]
    pub translations: Vec<TagTranslationForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagFormPayload {
    pub translations: Vec<Translation<TagText>>,
}

#[derive(Debug, Error)]
pub enum TagFormError {
    #[error("Tag form contains invalid data: {0}")]
    TypeConstraint(FieldErrors),
}

impl TryFrom<TagForm> for TagFormPayload {
    type Error = TagFormError;

    fn try_from(value: TagForm) -> Result<Self, Self::Error> {
        let translations = parse_translations(value.translations, |entry| {
            Ok(Translation::new(
                LanguageCode::new(entry.language)?,
                TagText {
                    name: TagName::new(entry.name)?,
                },
            ))
        })
        .map_err(TagFormError::TypeConstraint)?;

        Ok(Self { translations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_overlong_names() {
        let form = TagForm {
            translations: vec![TagTranslationForm {
                language: "en".to_string(),
                name: "x".repeat(65),
            }],
        };

        let err = TagFormPayload::try_from(form).unwrap_err();
        assert!(matches!(
            err,
            TagFormError::TypeConstraint(fields)
                if fields.get("translations[0].name") == Some("must be 1 to 64 characters long")
        ));
    }

    #[test]
    fn empty_form_defers_presence_check() {
        let form: TagForm = serde_json::from_str("{}").unwrap();
        let payload = TagFormPayload::try_from(form).unwrap();
        assert!(payload.translations.is_empty());
    }
}
