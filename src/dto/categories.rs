use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::{Category, CategoryText};
use crate::domain::translation::{Translated, Translation};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTranslationDto {
    pub language: String,
    pub title: String,
}

/// Category as rendered by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub is_active: bool,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
    pub translations: Vec<CategoryTranslationDto>,
}

impl From<Translation<CategoryText>> for CategoryTranslationDto {
    fn from(value: Translation<CategoryText>) -> Self {
        Self {
            language: value.language.into(),
            title: value.fields.title.into_inner(),
        }
    }
}

impl From<Translated<Category>> for CategoryDto {
    fn from(value: Translated<Category>) -> Self {
        Self {
            id: value.entity.id.get(),
            is_active: value.entity.is_active,
            created_on: value.entity.created_on,
            updated_on: value.entity.updated_on,
            translations: value.translations.into_iter().map(Into::into).collect(),
        }
    }
}
