use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::tag::{Tag as DomainTag, TagText};
use crate::domain::translation::Translation;
use crate::domain::types::{LanguageCode, TagName, TypeConstraintError};

/// Diesel model representing the `tags` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: i32,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
}

/// Insertable form of [`Tag`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag {
    pub created_on: NaiveDateTime,
}

/// Row of `tag_translations`.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tag_translations)]
pub struct NewTagTranslation<'a> {
    pub tag_id: i32,
    pub language_id: i32,
    pub name: &'a str,
}

impl TryFrom<Tag> for DomainTag {
    type Error = TypeConstraintError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tag.id.try_into()?,
            created_on: tag.created_on,
            updated_on: tag.updated_on,
        })
    }
}

/// Convert a `(language code, name)` row into a domain translation.
pub fn translation_from_row(
    (code, name): (String, String),
) -> Result<Translation<TagText>, TypeConstraintError> {
    Ok(Translation::new(
        LanguageCode::new(code)?,
        TagText {
            name: TagName::new(name)?,
        },
    ))
}
