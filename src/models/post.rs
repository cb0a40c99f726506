use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::post::{Post as DomainPost, PostStatus as DomainPostStatus, PostText};
use crate::domain::translation::Translation;
use crate::domain::types::{
    LanguageCode, PostStatusName, PostTitle, TagId, TypeConstraintError,
};

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub category_id: i32,
    pub post_status_id: i32,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
}

/// Insertable form of [`Post`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    pub category_id: i32,
    pub post_status_id: i32,
    pub created_on: NaiveDateTime,
}

/// Patch applied on update; `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct PostChangeset {
    pub category_id: Option<i32>,
    pub post_status_id: Option<i32>,
    pub updated_on: NaiveDateTime,
}

/// Row of `post_translations`.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::post_translations)]
pub struct NewPostTranslation<'a> {
    pub post_id: i32,
    pub language_id: i32,
    pub title: &'a str,
    pub body: &'a str,
}

/// Row of the `post_tags` association table.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::post_tags)]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

/// Diesel model representing the `post_statuses` catalog.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::post_statuses)]
pub struct PostStatus {
    pub id: i32,
    pub name: String,
}

impl Post {
    /// Build the domain record, attaching the already loaded tag ids.
    pub fn into_domain(self, tag_ids: Vec<i32>) -> Result<DomainPost, TypeConstraintError> {
        let mut tag_ids = tag_ids
            .into_iter()
            .map(TagId::new)
            .collect::<Result<Vec<_>, _>>()?;
        tag_ids.sort();

        Ok(DomainPost {
            id: self.id.try_into()?,
            category_id: self.category_id.try_into()?,
            post_status_id: self.post_status_id.try_into()?,
            tag_ids,
            created_on: self.created_on,
            updated_on: self.updated_on,
        })
    }
}

impl TryFrom<PostStatus> for DomainPostStatus {
    type Error = TypeConstraintError;

    fn try_from(status: PostStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            id: status.id.try_into()?,
            name: PostStatusName::new(status.name)?,
        })
    }
}

/// Convert a `(language code, title, body)` row into a domain translation.
pub fn translation_from_row(
    (code, title, body): (String, String, String),
) -> Result<Translation<PostText>, TypeConstraintError> {
    Ok(Translation::new(
        LanguageCode::new(code)?,
        PostText {
            title: PostTitle::new(title)?,
            body,
        },
    ))
}
