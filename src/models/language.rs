use diesel::prelude::*;

use crate::domain::language::Language as DomainLanguage;
use crate::domain::types::{LanguageCode, LanguageName, TypeConstraintError};

/// Diesel model representing the `languages` catalog.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::languages)]
pub struct Language {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl TryFrom<Language> for DomainLanguage {
    type Error = TypeConstraintError;

    fn try_from(language: Language) -> Result<Self, Self::Error> {
        Ok(Self {
            id: language.id.try_into()?,
            code: LanguageCode::new(language.code)?,
            name: LanguageName::new(language.name)?,
        })
    }
}
