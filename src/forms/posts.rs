use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::post::{NewPost, PostChanges, PostText};
use crate::domain::translation::Translation;
use crate::domain::types::{
    CategoryId, LanguageCode, PostStatusId, PostTitle, TagId, TypeConstraintError,
};
use crate::forms::{constraint_field, parse_translations};
use crate::services::FieldErrors;

#[derive(Debug, Deserialize, Validate)]
pub struct PostTranslationForm {
    #[validate(length(min = 2, max = 35, message = "must be a language code such as `en`"))]
    pub language: String,
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters long"))]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// JSON body accepted by the post create and update endpoints.
///
/// `category_id` and `post_status_id` are mandatory on create. On update an
/// absent field keeps the stored value and `tag_ids: []` detaches all tags.
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub category_id: Option<i32>,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub post_status_id: Option<i32>,
    #[serde(default)]
    pub tag_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub translations: Vec<PostTranslationForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePostPayload {
    pub post: NewPost,
    pub translations: Vec<Translation<PostText>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePostPayload {
    pub changes: PostChanges,
    pub translations: Vec<Translation<PostText>>,
}

#[derive(Debug, Error)]
pub enum PostFormError {
    #[error("Post form validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Post form contains invalid data: {0}")]
    TypeConstraint(FieldErrors),
}

impl From<ValidationErrors> for PostFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.into())
    }
}

impl From<TypeConstraintError> for PostFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(FieldErrors::single(
            constraint_field(&value),
            value.to_string(),
        ))
    }
}

fn parse_post_translations(
    entries: Vec<PostTranslationForm>,
) -> Result<Vec<Translation<PostText>>, PostFormError> {
    parse_translations(entries, |entry| {
        Ok(Translation::new(
            LanguageCode::new(entry.language)?,
            PostText {
                title: PostTitle::new(entry.title)?,
                body: entry.body,
            },
        ))
    })
    .map_err(PostFormError::TypeConstraint)
}

fn parse_tag_ids(tag_ids: Vec<i32>) -> Result<Vec<TagId>, PostFormError> {
    Ok(tag_ids
        .into_iter()
        .map(TagId::new)
        .collect::<Result<Vec<_>, _>>()?)
}

impl TryFrom<PostForm> for CreatePostPayload {
    type Error = PostFormError;

    fn try_from(value: PostForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut missing = FieldErrors::new();
        if value.category_id.is_none() {
            missing.insert("category_id", "is required");
        }
        if value.post_status_id.is_none() {
            missing.insert("post_status_id", "is required");
        }
        let (Some(category_id), Some(post_status_id)) = (value.category_id, value.post_status_id)
        else {
            return Err(PostFormError::Validation(missing));
        };

        Ok(Self {
            post: NewPost {
                category_id: CategoryId::new(category_id)?,
                post_status_id: PostStatusId::new(post_status_id)?,
                tag_ids: parse_tag_ids(value.tag_ids.unwrap_or_default())?,
            },
            translations: parse_post_translations(value.translations)?,
        })
    }
}

impl TryFrom<PostForm> for UpdatePostPayload {
    type Error = PostFormError;

    fn try_from(value: PostForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            changes: PostChanges {
                category_id: value.category_id.map(CategoryId::new).transpose()?,
                post_status_id: value.post_status_id.map(PostStatusId::new).transpose()?,
                tag_ids: value.tag_ids.map(parse_tag_ids).transpose()?,
            },
            translations: parse_post_translations(value.translations)?,
        })
    }
}
