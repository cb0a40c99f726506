use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::post::{NewPost, Post, PostChanges, PostText};
use crate::domain::translation::{Aggregate, Translation};
use crate::domain::types::{CategoryId, LanguageCode, PostId, PostStatusId, TagId};
use crate::models::post::{
    NewPost as DbNewPost, NewPostTranslation, Post as DbPost, PostChangeset, PostTag,
    translation_from_row,
};
use crate::repository::language::language_id;
use crate::repository::{EntityStore, RepositoryError, RepositoryResult, TranslationStore};

fn ensure_category(conn: &mut SqliteConnection, id: CategoryId) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists = diesel::select(diesel::dsl::exists(categories::table.find(id.get())))
        .get_result::<bool>(conn)?;
    if !exists {
        return Err(RepositoryError::validation(
            "category_id",
            format!("category {id} does not exist"),
        ));
    }
    Ok(())
}

fn ensure_status(conn: &mut SqliteConnection, id: PostStatusId) -> RepositoryResult<()> {
    use crate::schema::post_statuses;

    let exists = diesel::select(diesel::dsl::exists(post_statuses::table.find(id.get())))
        .get_result::<bool>(conn)?;
    if !exists {
        return Err(RepositoryError::validation(
            "post_status_id",
            format!("post status {id} does not exist"),
        ));
    }
    Ok(())
}

/// Deduplicate `tag_ids` and make sure every tag exists.
fn ensure_tags(conn: &mut SqliteConnection, tag_ids: &[TagId]) -> RepositoryResult<Vec<i32>> {
    use crate::schema::tags;

    let wanted: BTreeSet<i32> = tag_ids.iter().map(|id| id.get()).collect();
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let found: BTreeSet<i32> = tags::table
        .filter(tags::id.eq_any(wanted.iter().copied().collect::<Vec<_>>()))
        .select(tags::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    let missing: Vec<String> = wanted
        .difference(&found)
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RepositoryError::validation(
            "tag_ids",
            format!("unknown tag(s): {}", missing.join(", ")),
        ));
    }

    Ok(wanted.into_iter().collect())
}

fn replace_tags(
    conn: &mut SqliteConnection,
    post_id: i32,
    tag_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::post_tags;

    diesel::delete(post_tags::table.filter(post_tags::post_id.eq(post_id))).execute(conn)?;

    let rows: Vec<PostTag> = tag_ids
        .iter()
        .map(|&tag_id| PostTag { post_id, tag_id })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(post_tags::table)
            .values(&rows)
            .execute(conn)?;
    }
    Ok(())
}

fn load_tag_ids(conn: &mut SqliteConnection, post_id: i32) -> RepositoryResult<Vec<i32>> {
    use crate::schema::post_tags;

    Ok(post_tags::table
        .filter(post_tags::post_id.eq(post_id))
        .select(post_tags::tag_id)
        .order(post_tags::tag_id.asc())
        .load::<i32>(conn)?)
}

impl EntityStore<Post> for SqliteConnection {
    fn create_entity(&mut self, new: &NewPost) -> RepositoryResult<PostId> {
        use crate::schema::posts;

        ensure_category(self, new.category_id)?;
        ensure_status(self, new.post_status_id)?;
        let tag_ids = ensure_tags(self, &new.tag_ids)?;

        let row = DbNewPost {
            category_id: new.category_id.get(),
            post_status_id: new.post_status_id.get(),
            created_on: Utc::now().naive_utc(),
        };

        let id = diesel::insert_into(posts::table)
            .values(&row)
            .returning(posts::id)
            .get_result::<i32>(self)?;
        replace_tags(self, id, &tag_ids)?;

        Ok(PostId::new(id)?)
    }

    fn update_entity(&mut self, id: PostId, changes: &PostChanges) -> RepositoryResult<PostId> {
        use crate::schema::posts;

        let exists = diesel::select(diesel::dsl::exists(posts::table.find(id.get())))
            .get_result::<bool>(self)?;
        if !exists {
            return Err(RepositoryError::not_found(Post::NAME, id));
        }

        if let Some(category_id) = changes.category_id {
            ensure_category(self, category_id)?;
        }
        if let Some(status_id) = changes.post_status_id {
            ensure_status(self, status_id)?;
        }
        let tag_ids = changes
            .tag_ids
            .as_deref()
            .map(|tag_ids| ensure_tags(self, tag_ids))
            .transpose()?;

        let changeset = PostChangeset {
            category_id: changes.category_id.map(CategoryId::get),
            post_status_id: changes.post_status_id.map(PostStatusId::get),
            updated_on: Utc::now().naive_utc(),
        };
        diesel::update(posts::table.find(id.get()))
            .set(&changeset)
            .execute(self)?;

        if let Some(tag_ids) = tag_ids {
            replace_tags(self, id.get(), &tag_ids)?;
        }
        Ok(id)
    }

    fn delete_entity(&mut self, id: PostId) -> RepositoryResult<()> {
        use crate::schema::{post_tags, post_translations, posts};

        let exists = diesel::select(diesel::dsl::exists(posts::table.find(id.get())))
            .get_result::<bool>(self)?;
        if !exists {
            return Err(RepositoryError::not_found(Post::NAME, id));
        }

        let translations = post_translations::table
            .filter(post_translations::post_id.eq(id.get()))
            .count()
            .get_result::<i64>(self)?;
        if translations > 0 {
            return Err(RepositoryError::Conflict(format!(
                "post {id} still has {translations} translation(s)"
            )));
        }

        diesel::delete(post_tags::table.filter(post_tags::post_id.eq(id.get()))).execute(self)?;
        diesel::delete(posts::table.find(id.get())).execute(self)?;
        Ok(())
    }

    fn fetch_entity(&mut self, id: PostId) -> RepositoryResult<Option<Post>> {
        use crate::schema::posts;

        let Some(post) = posts::table
            .find(id.get())
            .first::<DbPost>(self)
            .optional()?
        else {
            return Ok(None);
        };

        let tag_ids = load_tag_ids(self, post.id)?;
        Ok(Some(post.into_domain(tag_ids)?))
    }

    fn list_entities(&mut self) -> RepositoryResult<Vec<Post>> {
        use crate::schema::{post_tags, posts};

        let rows = posts::table
            .order(posts::id.asc())
            .load::<DbPost>(self)?;

        let mut tags_by_post: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for (post_id, tag_id) in post_tags::table
            .select((post_tags::post_id, post_tags::tag_id))
            .load::<(i32, i32)>(self)?
        {
            tags_by_post.entry(post_id).or_default().push(tag_id);
        }

        let posts = rows
            .into_iter()
            .map(|post| {
                let tag_ids = tags_by_post.remove(&post.id).unwrap_or_default();
                post.into_domain(tag_ids)
            })
            .collect::<Result<Vec<Post>, _>>()?;

        Ok(posts)
    }
}

impl TranslationStore<Post> for SqliteConnection {
    fn list_translations(&mut self, id: PostId) -> RepositoryResult<Vec<Translation<PostText>>> {
        use crate::schema::{languages, post_translations};

        let translations = post_translations::table
            .inner_join(languages::table)
            .filter(post_translations::post_id.eq(id.get()))
            .select((
                languages::code,
                post_translations::title,
                post_translations::body,
            ))
            .order(languages::code.asc())
            .load::<(String, String, String)>(self)?
            .into_iter()
            .map(translation_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(translations)
    }

    fn insert_translation(
        &mut self,
        id: PostId,
        translation: &Translation<PostText>,
    ) -> RepositoryResult<()> {
        use crate::schema::post_translations;

        let language_id = language_id(self, &translation.language)?;
        diesel::insert_into(post_translations::table)
            .values(NewPostTranslation {
                post_id: id.get(),
                language_id,
                title: translation.fields.title.as_str(),
                body: translation.fields.body.as_str(),
            })
            .execute(self)?;

        Ok(())
    }

    fn update_translation(
        &mut self,
        id: PostId,
        translation: &Translation<PostText>,
    ) -> RepositoryResult<()> {
        use crate::schema::post_translations;

        let language_id = language_id(self, &translation.language)?;
        let affected = diesel::update(
            post_translations::table
                .filter(post_translations::post_id.eq(id.get()))
                .filter(post_translations::language_id.eq(language_id)),
        )
        .set((
            post_translations::title.eq(translation.fields.title.as_str()),
            post_translations::body.eq(translation.fields.body.as_str()),
        ))
        .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "post {id} has no `{}` translation",
                translation.language
            )));
        }
        Ok(())
    }

    fn delete_translation(&mut self, id: PostId, language: &LanguageCode) -> RepositoryResult<()> {
        use crate::schema::post_translations;

        let language_id = language_id(self, language)?;
        let affected = diesel::delete(
            post_translations::table
                .filter(post_translations::post_id.eq(id.get()))
                .filter(post_translations::language_id.eq(language_id)),
        )
        .execute(self)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "post {id} has no `{language}` translation"
            )));
        }
        Ok(())
    }
}
