use serde::Serialize;

use crate::domain::language::Language;
use crate::domain::post::PostStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageDto {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<Language> for LanguageDto {
    fn from(value: Language) -> Self {
        Self {
            id: value.id.get(),
            code: value.code.into(),
            name: value.name.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostStatusDto {
    pub id: i32,
    pub name: String,
}

impl From<PostStatus> for PostStatusDto {
    fn from(value: PostStatus) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}
