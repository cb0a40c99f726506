use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::category::{CategoryChanges, CategoryText, NewCategory};
use crate::domain::translation::Translation;
use crate::domain::types::{CategoryTitle, LanguageCode};
use crate::forms::parse_translations;
use crate::services::FieldErrors;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryTranslationForm {
    #[validate(length(min = 2, max = 35, message = "must be a language code such as `en`"))]
    pub language: String,
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters long"))]
    pub title: String,
}

/// JSON body accepted by the category create and update endpoints.
///
/// Field rules live on the translation entries.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub translations: Vec<CategoryTranslationForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub is_active: Option<bool>,
    pub translations: Vec<Translation<CategoryText>>,
}

impl CategoryFormPayload {
    /// New categories are inactive unless stated otherwise.
    pub fn into_new_category(self) -> (NewCategory, Vec<Translation<CategoryText>>) {
        let new = NewCategory {
            is_active: self.is_active.unwrap_or(false),
        };
        (new, self.translations)
    }

    pub fn into_changes(self) -> (CategoryChanges, Vec<Translation<CategoryText>>) {
        let changes = CategoryChanges {
            is_active: self.is_active,
        };
        (changes, self.translations)
    }
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(FieldErrors),
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let translations = parse_translations(value.translations, |entry| {
            Ok(Translation::new(
                LanguageCode::new(entry.language)?,
                CategoryText {
                    title: CategoryTitle::new(entry.title)?,
                },
            ))
        })
        .map_err(CategoryFormError::TypeConstraint)?;

        Ok(Self {
            is_active: value.is_active,
            translations,
        })
    }
}
