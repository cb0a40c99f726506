use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::post::{Post, PostText};
use crate::domain::translation::{Translated, Translation};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostTranslationDto {
    pub language: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDto {
    pub id: i32,
    pub category_id: i32,
    pub post_status_id: i32,
    pub tag_ids: Vec<i32>,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
    pub translations: Vec<PostTranslationDto>,
}

impl From<Translation<PostText>> for PostTranslationDto {
    fn from(value: Translation<PostText>) -> Self {
        Self {
            language: value.language.into(),
            title: value.fields.title.into_inner(),
            body: value.fields.body,
        }
    }
}

impl From<Translated<Post>> for PostDto {
    fn from(value: Translated<Post>) -> Self {
        let post = value.entity;
        Self {
            id: post.id.get(),
            category_id: post.category_id.get(),
            post_status_id: post.post_status_id.get(),
            tag_ids: post.tag_ids.into_iter().map(|id| id.get()).collect(),
            created_on: post.created_on,
            updated_on: post.updated_on,
            translations: value.translations.into_iter().map(Into::into).collect(),
        }
    }
}
