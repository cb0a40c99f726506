use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::tag::{Tag, TagText};
use crate::domain::translation::{Translated, Translation};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTranslationDto {
    pub language: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagDto {
    pub id: i32,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
    pub translations: Vec<TagTranslationDto>,
}

impl From<Translation<TagText>> for TagTranslationDto {
    fn from(value: Translation<TagText>) -> Self {
        Self {
            language: value.language.into(),
            name: value.fields.name.into_inner(),
        }
    }
}

impl From<Translated<Tag>> for TagDto {
    fn from(value: Translated<Tag>) -> Self {
        Self {
            id: value.entity.id.get(),
            created_on: value.entity.created_on,
            updated_on: value.entity.updated_on,
            translations: value.translations.into_iter().map(Into::into).collect(),
        }
    }
}
