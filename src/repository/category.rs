use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::{Category, CategoryChanges, CategoryText, NewCategory};
use crate::domain::translation::{Aggregate, Translation};
use crate::domain::types::{CategoryId, LanguageCode};
use crate::models::category::{
    Category as DbCategory, CategoryChangeset, NewCategory as DbNewCategory,
    NewCategoryTranslation, translation_from_row,
};
use crate::repository::language::language_id;
use crate::repository::{EntityStore, RepositoryError, RepositoryResult, TranslationStore};

impl EntityStore<Category> for SqliteConnection {
    fn create_entity(&mut self, new: &NewCategory) -> RepositoryResult<CategoryId> {
        use crate::schema::categories;

        let row = DbNewCategory {
            is_active: new.is_active,
            created_on: Utc::now().naive_utc(),
        };

        let id = diesel::insert_into(categories::table)
            .values(&row)
            .returning(categories::id)
            .get_result::<i32>(self)?;

        Ok(CategoryId::new(id)?)
    }

    fn update_entity(
        &mut self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> RepositoryResult<CategoryId> {
        use crate::schema::categories;

        let changeset = CategoryChangeset {
            is_active: changes.is_active,
            updated_on: Utc::now().naive_utc(),
        };

        let affected = diesel::update(categories::table.find(id.get()))
            .set(&changeset)
            .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::not_found(Category::NAME, id));
        }
        Ok(id)
    }

    fn delete_entity(&mut self, id: CategoryId) -> RepositoryResult<()> {
        use crate::schema::{categories, category_translations, posts};

        let exists = diesel::select(diesel::dsl::exists(categories::table.find(id.get())))
            .get_result::<bool>(self)?;
        if !exists {
            return Err(RepositoryError::not_found(Category::NAME, id));
        }

        let translations = category_translations::table
            .filter(category_translations::category_id.eq(id.get()))
            .count()
            .get_result::<i64>(self)?;
        if translations > 0 {
            return Err(RepositoryError::Conflict(format!(
                "category {id} still has {translations} translation(s)"
            )));
        }

        let posts = posts::table
            .filter(posts::category_id.eq(id.get()))
            .count()
            .get_result::<i64>(self)?;
        if posts > 0 {
            return Err(RepositoryError::Conflict(format!(
                "category {id} is used by {posts} post(s)"
            )));
        }

        diesel::delete(categories::table.find(id.get())).execute(self)?;
        Ok(())
    }

    fn fetch_entity(&mut self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(self)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn list_entities(&mut self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let categories = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(self)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(categories)
    }
}

impl TranslationStore<Category> for SqliteConnection {
    fn list_translations(
        &mut self,
        id: CategoryId,
    ) -> RepositoryResult<Vec<Translation<CategoryText>>> {
        use crate::schema::{category_translations, languages};

        let translations = category_translations::table
            .inner_join(languages::table)
            .filter(category_translations::category_id.eq(id.get()))
            .select((languages::code, category_translations::title))
            .order(languages::code.asc())
            .load::<(String, String)>(self)?
            .into_iter()
            .map(translation_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(translations)
    }

    fn insert_translation(
        &mut self,
        id: CategoryId,
        translation: &Translation<CategoryText>,
    ) -> RepositoryResult<()> {
        use crate::schema::category_translations;

        let language_id = language_id(self, &translation.language)?;
        diesel::insert_into(category_translations::table)
            .values(NewCategoryTranslation {
                category_id: id.get(),
                language_id,
                title: translation.fields.title.as_str(),
            })
            .execute(self)?;

        Ok(())
    }

    fn update_translation(
        &mut self,
        id: CategoryId,
        translation: &Translation<CategoryText>,
    ) -> RepositoryResult<()> {
        use crate::schema::category_translations;

        let language_id = language_id(self, &translation.language)?;
        let affected = diesel::update(
            category_translations::table
                .filter(category_translations::category_id.eq(id.get()))
                .filter(category_translations::language_id.eq(language_id)),
        )
        .set(category_translations::title.eq(translation.fields.title.as_str()))
        .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "category {id} has no `{}` translation",
                translation.language
            )));
        }
        Ok(())
    }

    fn delete_translation(
        &mut self,
        id: CategoryId,
        language: &LanguageCode,
    ) -> RepositoryResult<()> {
        use crate::schema::category_translations;

        let language_id = language_id(self, language)?;
        let affected = diesel::delete(
            category_translations::table
                .filter(category_translations::category_id.eq(id.get()))
                .filter(category_translations::language_id.eq(language_id)),
        )
        .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "category {id} has no `{language}` translation"
            )));
        }
        Ok(())
    }
}
