use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use chrono::DateTime;

use crate::domain::category::{Category, CategoryChanges, CategoryText, NewCategory};
use crate::domain::language::Language;
use crate::domain::post::{NewPost, Post, PostChanges, PostStatus, PostText};
use crate::domain::tag::{NewTag, Tag, TagChanges, TagText};
use crate::domain::translation::{Aggregate, Translation};
use crate::domain::types::{
    CategoryId, LanguageCode, LanguageId, LanguageName, PostId, PostStatusId, PostStatusName,
    TagId,
};
use crate::repository::{
    EntityStore, LanguageReader, PostStatusReader, RepositoryError, RepositoryResult,
    TranslationStore, UnitOfWork,
};

type TranslationRows<I, F> = BTreeMap<(I, LanguageCode), F>;

/// In-memory state behind [`TestRepository`].
///
/// A transaction works on a clone and only replaces the committed state
/// when the closure succeeds, which mirrors database rollback.
#[derive(Clone, Default)]
pub struct TestStore {
    languages: Vec<Language>,
    post_statuses: Vec<PostStatus>,
    categories: BTreeMap<CategoryId, Category>,
    category_translations: TranslationRows<CategoryId, CategoryText>,
    posts: BTreeMap<PostId, Post>,
    post_translations: TranslationRows<PostId, PostText>,
    tags: BTreeMap<TagId, Tag>,
    tag_translations: TranslationRows<TagId, TagText>,
    next_id: i32,
    tick: i64,
    /// Make every translation insert fail as if the database went away.
    pub fail_translation_inserts: bool,
}

/// Simple in-memory repository used for unit tests.
pub struct TestRepository {
    state: Mutex<TestStore>,
}

impl Default for TestRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepository {
    /// Repository seeded with the same catalogs as the migrations.
    pub fn new() -> Self {
        let languages = [
            ("en", "English"),
            ("fr", "Français"),
            ("en-CA", "English (Canada)"),
            ("fr-CA", "Français (Canada)"),
            ("ru", "Русский"),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (code, name))| Language {
            id: LanguageId::new(index as i32 + 1).unwrap(),
            code: LanguageCode::new(code).unwrap(),
            name: LanguageName::new(name).unwrap(),
        })
        .collect();

        let post_statuses = ["draft", "published", "archived"]
            .into_iter()
            .enumerate()
            .map(|(index, name)| PostStatus {
                id: PostStatusId::new(index as i32 + 1).unwrap(),
                name: PostStatusName::new(name).unwrap(),
            })
            .collect();

        Self {
            state: Mutex::new(TestStore {
                languages,
                post_statuses,
                ..TestStore::default()
            }),
        }
    }

    /// Toggle simulated infrastructure failures for translation inserts.
    pub fn fail_translation_inserts(&self, fail: bool) {
        self.state.lock().unwrap().fail_translation_inserts = fail;
    }

    /// Copy of the committed state for assertions.
    pub fn snapshot(&self) -> TestStore {
        self.state.lock().unwrap().clone()
    }
}

impl TestStore {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Number of translation rows across every aggregate.
    pub fn translation_count(&self) -> usize {
        self.category_translations.len()
            + self.post_translations.len()
            + self.tag_translations.len()
    }

    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Deterministic, strictly increasing timestamps.
    fn now(&mut self) -> chrono::NaiveDateTime {
        self.tick += 1;
        DateTime::from_timestamp(1_700_000_000 + self.tick, 0)
            .unwrap()
            .naive_utc()
    }

    fn ensure_language(&self, code: &LanguageCode) -> RepositoryResult<()> {
        if self.languages.iter().any(|l| &l.code == code) {
            Ok(())
        } else {
            Err(RepositoryError::validation(
                "language",
                format!("unknown language `{code}`"),
            ))
        }
    }

    fn ensure_post_references(
        &self,
        category_id: Option<CategoryId>,
        status_id: Option<PostStatusId>,
        tag_ids: Option<&[TagId]>,
    ) -> RepositoryResult<()> {
        if let Some(id) = category_id.filter(|id| !self.categories.contains_key(id)) {
            return Err(RepositoryError::validation(
                "category_id",
                format!("category {id} does not exist"),
            ));
        }
        if let Some(id) = status_id.filter(|id| !self.post_statuses.iter().any(|s| s.id == *id)) {
            return Err(RepositoryError::validation(
                "post_status_id",
                format!("post status {id} does not exist"),
            ));
        }
        if let Some(tag_ids) = tag_ids {
            let missing: Vec<String> = tag_ids
                .iter()
                .filter(|id| !self.tags.contains_key(*id))
                .map(ToString::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(RepositoryError::validation(
                    "tag_ids",
                    format!("unknown tag(s): {}", missing.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

fn sorted_unique(tag_ids: &[TagId]) -> Vec<TagId> {
    tag_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn list_rows<I: Ord + Copy, F: Clone>(rows: &TranslationRows<I, F>, id: I) -> Vec<Translation<F>> {
    rows.iter()
        .filter(|((owner, _), _)| *owner == id)
        .map(|((_, language), fields)| Translation::new(language.clone(), fields.clone()))
        .collect()
}

fn count_rows<I: Ord + Copy, F>(rows: &TranslationRows<I, F>, id: I) -> usize {
    rows.keys().filter(|(owner, _)| *owner == id).count()
}

macro_rules! translation_store {
    ($aggregate:ty, $id:ty, $fields:ty, $rows:ident) => {
        impl TranslationStore<$aggregate> for TestStore {
            fn list_translations(
                &mut self,
                id: $id,
            ) -> RepositoryResult<Vec<Translation<$fields>>> {
                Ok(list_rows(&self.$rows, id))
            }

            fn insert_translation(
                &mut self,
                id: $id,
                translation: &Translation<$fields>,
            ) -> RepositoryResult<()> {
                if self.fail_translation_inserts {
                    return Err(RepositoryError::Database("disk I/O error".to_string()));
                }
                self.ensure_language(&translation.language)?;
                let key = (id, translation.language.clone());
                if self.$rows.contains_key(&key) {
                    return Err(RepositoryError::Conflict(format!(
                        "UNIQUE constraint failed: {} {id} already has `{}`",
                        <$aggregate>::NAME,
                        translation.language
                    )));
                }
                self.$rows.insert(key, translation.fields.clone());
                Ok(())
            }

            fn update_translation(
                &mut self,
                id: $id,
                translation: &Translation<$fields>,
            ) -> RepositoryResult<()> {
                self.ensure_language(&translation.language)?;
                match self.$rows.get_mut(&(id, translation.language.clone())) {
                    Some(fields) => {
                        *fields = translation.fields.clone();
                        Ok(())
                    }
                    None => Err(RepositoryError::NotFound(format!(
                        "{} {id} has no `{}` translation",
                        <$aggregate>::NAME,
                        translation.language
                    ))),
                }
            }

            fn delete_translation(
                &mut self,
                id: $id,
                language: &LanguageCode,
            ) -> RepositoryResult<()> {
                match self.$rows.remove(&(id, language.clone())) {
                    Some(_) => Ok(()),
                    None => Err(RepositoryError::NotFound(format!(
                        "{} {id} has no `{language}` translation",
                        <$aggregate>::NAME
                    ))),
                }
            }
        }
    };
}

translation_store!(Category, CategoryId, CategoryText, category_translations);
translation_store!(Post, PostId, PostText, post_translations);
translation_store!(Tag, TagId, TagText, tag_translations);

impl EntityStore<Category> for TestStore {
    fn create_entity(&mut self, new: &NewCategory) -> RepositoryResult<CategoryId> {
        let id = CategoryId::new(self.next_id())?;
        let created_on = self.now();
        self.categories.insert(
            id,
            Category {
                id,
                is_active: new.is_active,
                created_on,
                updated_on: None,
            },
        );
        Ok(id)
    }

    fn update_entity(
        &mut self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> RepositoryResult<CategoryId> {
        let now = self.now();
        let category = self
            .categories
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Category::NAME, id))?;
        if let Some(is_active) = changes.is_active {
            category.is_active = is_active;
        }
        category.updated_on = Some(now);
        Ok(id)
    }

    fn delete_entity(&mut self, id: CategoryId) -> RepositoryResult<()> {
        if !self.categories.contains_key(&id) {
            return Err(RepositoryError::not_found(Category::NAME, id));
        }
        let translations = count_rows(&self.category_translations, id);
        if translations > 0 {
            return Err(RepositoryError::Conflict(format!(
                "category {id} still has {translations} translation(s)"
            )));
        }
        let posts = self.posts.values().filter(|p| p.category_id == id).count();
        if posts > 0 {
            return Err(RepositoryError::Conflict(format!(
                "category {id} is used by {posts} post(s)"
            )));
        }
        self.categories.remove(&id);
        Ok(())
    }

    fn fetch_entity(&mut self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.get(&id).cloned())
    }

    fn list_entities(&mut self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.values().cloned().collect())
    }
}

impl EntityStore<Post> for TestStore {
    fn create_entity(&mut self, new: &NewPost) -> RepositoryResult<PostId> {
        self.ensure_post_references(
            Some(new.category_id),
            Some(new.post_status_id),
            Some(&new.tag_ids),
        )?;
        let id = PostId::new(self.next_id())?;
        let created_on = self.now();
        self.posts.insert(
            id,
            Post {
                id,
                category_id: new.category_id,
                post_status_id: new.post_status_id,
                tag_ids: sorted_unique(&new.tag_ids),
                created_on,
                updated_on: None,
            },
        );
        Ok(id)
    }

    fn update_entity(&mut self, id: PostId, changes: &PostChanges) -> RepositoryResult<PostId> {
        if !self.posts.contains_key(&id) {
            return Err(RepositoryError::not_found(Post::NAME, id));
        }
        self.ensure_post_references(
            changes.category_id,
            changes.post_status_id,
            changes.tag_ids.as_deref(),
        )?;
        let now = self.now();
        let post = self
            .posts
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Post::NAME, id))?;
        if let Some(category_id) = changes.category_id {
            post.category_id = category_id;
        }
        if let Some(status_id) = changes.post_status_id {
            post.post_status_id = status_id;
        }
        if let Some(tag_ids) = &changes.tag_ids {
            post.tag_ids = sorted_unique(tag_ids);
        }
        post.updated_on = Some(now);
        Ok(id)
    }

    fn delete_entity(&mut self, id: PostId) -> RepositoryResult<()> {
        if !self.posts.contains_key(&id) {
            return Err(RepositoryError::not_found(Post::NAME, id));
        }
        let translations = count_rows(&self.post_translations, id);
        if translations > 0 {
            return Err(RepositoryError::Conflict(format!(
                "post {id} still has {translations} translation(s)"
            )));
        }
        self.posts.remove(&id);
        Ok(())
    }

    fn fetch_entity(&mut self, id: PostId) -> RepositoryResult<Option<Post>> {
        Ok(self.posts.get(&id).cloned())
    }

    fn list_entities(&mut self) -> RepositoryResult<Vec<Post>> {
        Ok(self.posts.values().cloned().collect())
    }
}

impl EntityStore<Tag> for TestStore {
    fn create_entity(&mut self, _new: &NewTag) -> RepositoryResult<TagId> {
        let id = TagId::new(self.next_id())?;
        let created_on = self.now();
        self.tags.insert(
            id,
            Tag {
                id,
                created_on,
                updated_on: None,
            },
        );
        Ok(id)
    }

    fn update_entity(&mut self, id: TagId, _changes: &TagChanges) -> RepositoryResult<TagId> {
        let now = self.now();
        let tag = self
            .tags
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Tag::NAME, id))?;
        tag.updated_on = Some(now);
        Ok(id)
    }

    fn delete_entity(&mut self, id: TagId) -> RepositoryResult<()> {
        if !self.tags.contains_key(&id) {
            return Err(RepositoryError::not_found(Tag::NAME, id));
        }
        let translations = count_rows(&self.tag_translations, id);
        if translations > 0 {
            return Err(RepositoryError::Conflict(format!(
                "tag {id} still has {translations} translation(s)"
            )));
        }
        for post in self.posts.values_mut() {
            post.tag_ids.retain(|tag_id| *tag_id != id);
        }
        self.tags.remove(&id);
        Ok(())
    }

    fn fetch_entity(&mut self, id: TagId) -> RepositoryResult<Option<Tag>> {
        Ok(self.tags.get(&id).cloned())
    }

    fn list_entities(&mut self) -> RepositoryResult<Vec<Tag>> {
        Ok(self.tags.values().cloned().collect())
    }
}

impl LanguageReader for TestStore {
    fn list_languages(&mut self) -> RepositoryResult<Vec<Language>> {
        let mut languages = self.languages.clone();
        languages.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(languages)
    }

    fn find_language(&mut self, code: &LanguageCode) -> RepositoryResult<Option<Language>> {
        Ok(self.languages.iter().find(|l| &l.code == code).cloned())
    }
}

impl PostStatusReader for TestStore {
    fn list_post_statuses(&mut self) -> RepositoryResult<Vec<PostStatus>> {
        Ok(self.post_statuses.clone())
    }
}

impl UnitOfWork for TestRepository {
    type Conn = TestStore;

    fn read<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut TestStore) -> RepositoryResult<T>,
    {
        let mut working = self.state.lock().unwrap().clone();
        f(&mut working)
    }

    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut TestStore) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut committed = self.state.lock().unwrap();
        let mut working = committed.clone();
        let value = f(&mut working)?;
        *committed = working;
        Ok(value)
    }
}
