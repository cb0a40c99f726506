use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::language::Language;
use crate::domain::post::PostStatus;
use crate::domain::types::LanguageCode;
use crate::models::language::Language as DbLanguage;
use crate::models::post::PostStatus as DbPostStatus;
use crate::repository::{LanguageReader, PostStatusReader, RepositoryError, RepositoryResult};

/// Resolve a language code to its catalog id.
///
/// Unknown codes are reported as a validation failure on the `language` field.
pub(crate) fn language_id(
    conn: &mut SqliteConnection,
    code: &LanguageCode,
) -> RepositoryResult<i32> {
    use crate::schema::languages;

    languages::table
        .filter(languages::code.eq(code.as_str()))
        .select(languages::id)
        .first::<i32>(conn)
        .optional()?
        .ok_or_else(|| {
            RepositoryError::validation("language", format!("unknown language `{code}`"))
        })
}

impl LanguageReader for SqliteConnection {
    fn list_languages(&mut self) -> RepositoryResult<Vec<Language>> {
        use crate::schema::languages;

        let languages = languages::table
            .order(languages::code.asc())
            .load::<DbLanguage>(self)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Language>, _>>()?;

        Ok(languages)
    }

    fn find_language(&mut self, code: &LanguageCode) -> RepositoryResult<Option<Language>> {
        use crate::schema::languages;

        let language = languages::table
            .filter(languages::code.eq(code.as_str()))
            .first::<DbLanguage>(self)
            .optional()?;

        let language = language.map(TryInto::try_into).transpose()?;
        Ok(language)
    }
}

impl PostStatusReader for SqliteConnection {
    fn list_post_statuses(&mut self) -> RepositoryResult<Vec<PostStatus>> {
        use crate::schema::post_statuses;

        let statuses = post_statuses::table
            .order(post_statuses::id.asc())
            .load::<DbPostStatus>(self)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<PostStatus>, _>>()?;

        Ok(statuses)
    }
}
