use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tag::{NewTag, Tag, TagChanges, TagText};
use crate::domain::translation::{Aggregate, Translation};
use crate::domain::types::{LanguageCode, TagId};
use crate::models::tag::{
    NewTag as DbNewTag, NewTagTranslation, Tag as DbTag, translation_from_row,
};
use crate::repository::language::language_id;
use crate::repository::{EntityStore, RepositoryError, RepositoryResult, TranslationStore};

impl EntityStore<Tag> for SqliteConnection {
    fn create_entity(&mut self, _new: &NewTag) -> RepositoryResult<TagId> {
        use crate::schema::tags;

        let row = DbNewTag {
            created_on: Utc::now().naive_utc(),
        };

        let id = diesel::insert_into(tags::table)
            .values(&row)
            .returning(tags::id)
            .get_result::<i32>(self)?;

        Ok(TagId::new(id)?)
    }

    fn update_entity(&mut self, id: TagId, _changes: &TagChanges) -> RepositoryResult<TagId> {
        use crate::schema::tags;

        let affected = diesel::update(tags::table.find(id.get()))
            .set(tags::updated_on.eq(Some(Utc::now().naive_utc())))
            .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::not_found(Tag::NAME, id));
        }
        Ok(id)
    }

    /// Deleting a tag detaches it from every post.
    fn delete_entity(&mut self, id: TagId) -> RepositoryResult<()> {
        use crate::schema::{post_tags, tag_translations, tags};

        let exists = diesel::select(diesel::dsl::exists(tags::table.find(id.get())))
            .get_result::<bool>(self)?;
        if !exists {
            return Err(RepositoryError::not_found(Tag::NAME, id));
        }

        let translations = tag_translations::table
            .filter(tag_translations::tag_id.eq(id.get()))
            .count()
            .get_result::<i64>(self)?;
        if translations > 0 {
            return Err(RepositoryError::Conflict(format!(
                "tag {id} still has {translations} translation(s)"
            )));
        }

        diesel::delete(post_tags::table.filter(post_tags::tag_id.eq(id.get()))).execute(self)?;
        diesel::delete(tags::table.find(id.get())).execute(self)?;
        Ok(())
    }

    fn fetch_entity(&mut self, id: TagId) -> RepositoryResult<Option<Tag>> {
        use crate::schema::tags;

        let tag = tags::table
            .find(id.get())
            .first::<DbTag>(self)
            .optional()?;

        let tag = tag.map(TryInto::try_into).transpose()?;
        Ok(tag)
    }

    fn list_entities(&mut self) -> RepositoryResult<Vec<Tag>> {
        use crate::schema::tags;

        let tags = tags::table
            .order(tags::id.asc())
            .load::<DbTag>(self)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Tag>, _>>()?;

        Ok(tags)
    }
}

impl TranslationStore<Tag> for SqliteConnection {
    fn list_translations(&mut self, id: TagId) -> RepositoryResult<Vec<Translation<TagText>>> {
        use crate::schema::{languages, tag_translations};

        let translations = tag_translations::table
            .inner_join(languages::table)
            .filter(tag_translations::tag_id.eq(id.get()))
            .select((languages::code, tag_translations::name))
            .order(languages::code.asc())
            .load::<(String, String)>(self)?
            .into_iter()
            .map(translation_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(translations)
    }

    fn insert_translation(
        &mut self,
        id: TagId,
        translation: &Translation<TagText>,
    ) -> RepositoryResult<()> {
        use crate::schema::tag_translations;

        let language_id = language_id(self, &translation.language)?;
        diesel::insert_into(tag_translations::table)
            .values(NewTagTranslation {
                tag_id: id.get(),
                language_id,
                name: translation.fields.name.as_str(),
            })
            .execute(self)?;

        Ok(())
    }

    fn update_translation(
        &mut self,
        id: TagId,
        translation: &Translation<TagText>,
    ) -> RepositoryResult<()> {
        use crate::schema::tag_translations;

        let language_id = language_id(self, &translation.language)?;
        let affected = diesel::update(
            tag_translations::table
                .filter(tag_translations::tag_id.eq(id.get()))
                .filter(tag_translations::language_id.eq(language_id)),
        )
        .set(tag_translations::name.eq(translation.fields.name.as_str()))
        .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "tag {id} has no `{}` translation",
                translation.language
            )));
        }
        Ok(())
    }

    fn delete_translation(&mut self, id: TagId, language: &LanguageCode) -> RepositoryResult<()> {
        use crate::schema::tag_translations;

        let language_id = language_id(self, language)?;
        let affected = diesel::delete(
            tag_translations::table
                .filter(tag_translations::tag_id.eq(id.get()))
                .filter(tag_translations::language_id.eq(language_id)),
        )
        .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "tag {id} has no `{language}` translation"
            )));
        }
        Ok(())
    }
}
