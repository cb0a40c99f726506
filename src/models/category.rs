use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, CategoryText};
use crate::domain::translation::Translation;
use crate::domain::types::{CategoryTitle, LanguageCode, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub is_active: bool,
    pub created_on: NaiveDateTime,
    pub updated_on: Option<NaiveDateTime>,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub is_active: bool,
    pub created_on: NaiveDateTime,
}

/// Patch applied on update; `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangeset {
    pub is_active: Option<bool>,
    pub updated_on: NaiveDateTime,
}

/// Row of `category_translations`.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::category_translations)]
pub struct NewCategoryTranslation<'a> {
    pub category_id: i32,
    pub language_id: i32,
    pub title: &'a str,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            is_active: category.is_active,
            created_on: category.created_on,
            updated_on: category.updated_on,
        })
    }
}

/// Convert a `(language code, title)` row into a domain translation.
pub fn translation_from_row(
    (code, title): (String, String),
) -> Result<Translation<CategoryText>, TypeConstraintError> {
    Ok(Translation::new(
        LanguageCode::new(code)?,
        CategoryText {
            title: CategoryTitle::new(title)?,
        },
    ))
}
