use std::sync::Barrier;
use std::thread;

use diesel::prelude::*;
use pushkind_blog::domain::category::{Category, CategoryChanges, CategoryText, NewCategory};
use pushkind_blog::domain::post::{NewPost, Post, PostChanges, PostText};
use pushkind_blog::domain::tag::{NewTag, Tag, TagText};
use pushkind_blog::domain::translation::Translation;
use pushkind_blog::domain::types::{
    CategoryId, CategoryTitle, LanguageCode, PostStatusId, PostTitle, TagName,
};
use pushkind_blog::repository::{
    DieselRepository, EntityStore, LanguageReader, RepositoryError, TranslationStore, UnitOfWork,
};
use pushkind_blog::schema::{category_translations, categories, post_tags};
use pushkind_blog::services::{RejectionKind, ServiceError, aggregate};

mod common;

fn title(language: &str, title: &str) -> Translation<CategoryText> {
    Translation::new(
        LanguageCode::new(language).expect("valid language"),
        CategoryText {
            title: CategoryTitle::new(title).expect("valid title"),
        },
    )
}

fn post_text(language: &str, title: &str) -> Translation<PostText> {
    Translation::new(
        LanguageCode::new(language).expect("valid language"),
        PostText {
            title: PostTitle::new(title).expect("valid title"),
            body: format!("{title} body"),
        },
    )
}

fn tag_name(language: &str, name: &str) -> Translation<TagText> {
    Translation::new(
        LanguageCode::new(language).expect("valid language"),
        TagText {
            name: TagName::new(name).expect("valid name"),
        },
    )
}

fn create_category(
    repo: &DieselRepository,
    translations: Vec<Translation<CategoryText>>,
) -> CategoryId {
    aggregate::create::<Category, _>(repo, NewCategory { is_active: true }, translations)
        .expect("no infrastructure failure")
        .success()
        .expect("category should be created")
}

#[test]
fn category_create_update_delete() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let id = create_category(&repo, vec![title("en", "Books"), title("fr", "Livres")]);
    let stored = aggregate::get_one::<Category, _>(&repo, id)
        .expect("read")
        .expect("category exists");
    assert_eq!(stored.languages(), vec!["en", "fr"]);
    assert_eq!(stored.translation("fr").unwrap().title, "Livres");
    assert!(stored.entity.updated_on.is_none());

    let updated = aggregate::update::<Category, _>(
        &repo,
        id,
        CategoryChanges::default(),
        vec![title("en", "Literature")],
    )
    .expect("no infrastructure failure")
    .success()
    .expect("category should be updated");
    assert_eq!(updated.languages(), vec!["en"]);
    assert_eq!(updated.translation("en").unwrap().title, "Literature");
    assert!(updated.entity.updated_on.is_some());

    let deleted = aggregate::delete::<Category, _>(&repo, id).expect("no infrastructure failure");
    assert!(deleted.is_success());
    assert!(aggregate::get_one::<Category, _>(&repo, id).expect("read").is_none());

    let mut conn = test_db.pool().get().expect("connection");
    let remaining = category_translations::table
        .filter(category_translations::category_id.eq(id.get()))
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count translations");
    assert_eq!(remaining, 0);
}

#[test]
fn language_swap_does_not_hit_the_primary_key() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let id = create_category(&repo, vec![title("en", "Books")]);
    let updated = aggregate::update::<Category, _>(
        &repo,
        id,
        CategoryChanges::default(),
        vec![title("fr", "Books"), title("EN_ca", "Books")],
    )
    .expect("no infrastructure failure")
    .success()
    .expect("category should be updated");

    assert_eq!(updated.languages(), vec!["en-CA", "fr"]);
}

#[test]
fn duplicate_languages_roll_back_the_whole_update() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let id = create_category(&repo, vec![title("en", "Books")]);
    let result = aggregate::update::<Category, _>(
        &repo,
        id,
        CategoryChanges {
            is_active: Some(false),
        },
        vec![title("ru", "Книги"), title("ru", "Литература")],
    )
    .expect("no infrastructure failure");
    assert_eq!(result.rejection().unwrap().kind, RejectionKind::Validation);

    let stored = aggregate::get_one::<Category, _>(&repo, id)
        .expect("read")
        .expect("category exists");
    assert!(stored.entity.is_active);
    assert!(stored.entity.updated_on.is_none());
    assert_eq!(stored.languages(), vec!["en"]);
}

#[test]
fn failed_create_leaves_no_category_row() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let result = aggregate::create::<Category, _>(
        &repo,
        NewCategory::default(),
        vec![title("en", "Books"), title("xx", "Unknown")],
    )
    .expect("no infrastructure failure");
    assert_eq!(result.rejection().unwrap().kind, RejectionKind::Validation);

    let mut conn = test_db.pool().get().expect("connection");
    let rows = categories::table
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count categories");
    assert_eq!(rows, 0);
}

#[test]
fn transaction_rolls_back_on_error() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let result: Result<(), RepositoryError> = repo.transaction(|conn| {
        let id = EntityStore::<Category>::create_entity(conn, &NewCategory::default())?;
        TranslationStore::<Category>::insert_translation(conn, id, &title("en", "Books"))?;
        TranslationStore::<Category>::insert_translation(conn, id, &title("en", "Again"))?;
        Ok(())
    });
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    let listed = repo
        .read(|conn| EntityStore::<Category>::list_entities(conn))
        .expect("list categories");
    assert!(listed.is_empty());
}

#[test]
fn category_with_translations_cannot_be_deleted_directly() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let id = create_category(&repo, vec![title("en", "Books")]);

    let result = repo.read(|conn| EntityStore::<Category>::delete_entity(conn, id));
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    let missing = CategoryId::new(999).unwrap();
    let result = repo.read(|conn| EntityStore::<Category>::delete_entity(conn, missing));
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[test]
fn language_lookup_normalizes_codes() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let found = repo
        .read(|conn| conn.find_language(&LanguageCode::new("FR_ca").unwrap()))
        .expect("lookup");
    assert_eq!(found.expect("fr-CA is seeded").code, "fr-CA");

    let languages = repo.read(|conn| conn.list_languages()).expect("list");
    assert_eq!(languages.len(), 5);
}

#[test]
fn posts_validate_references_and_manage_tags() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, vec![title("en", "News")]);
    let rust = aggregate::create::<Tag, _>(&repo, NewTag, vec![tag_name("en", "rust")])
        .expect("no infrastructure failure")
        .success()
        .expect("tag created");
    let sqlite = aggregate::create::<Tag, _>(&repo, NewTag, vec![tag_name("en", "sqlite")])
        .expect("no infrastructure failure")
        .success()
        .expect("tag created");

    let rejected = aggregate::create::<Post, _>(
        &repo,
        NewPost {
            category_id: category,
            post_status_id: PostStatusId::new(9).unwrap(),
            tag_ids: vec![rust],
        },
        vec![post_text("en", "Hello")],
    )
    .expect("no infrastructure failure");
    let rejection = rejected.rejection().expect("unknown status is rejected");
    assert_eq!(rejection.kind, RejectionKind::Validation);
    assert!(rejection.fields.get("post_status_id").is_some());

    let post = aggregate::create::<Post, _>(
        &repo,
        NewPost {
            category_id: category,
            post_status_id: PostStatusId::new(1).unwrap(),
            tag_ids: vec![sqlite, rust, rust],
        },
        vec![post_text("en", "Hello"), post_text("fr", "Bonjour")],
    )
    .expect("no infrastructure failure")
    .success()
    .expect("post created");

    let stored = aggregate::get_one::<Post, _>(&repo, post)
        .expect("read")
        .expect("post exists");
    assert_eq!(stored.entity.tag_ids, vec![rust, sqlite]);
    assert_eq!(stored.translation("fr").unwrap().body, "Bonjour body");

    let blocked =
        aggregate::delete::<Category, _>(&repo, category).expect("no infrastructure failure");
    assert_eq!(blocked.rejection().unwrap().kind, RejectionKind::Conflict);
    let category_after = aggregate::get_one::<Category, _>(&repo, category)
        .expect("read")
        .expect("category kept");
    assert_eq!(category_after.languages(), vec!["en"]);

    assert!(
        aggregate::delete::<Tag, _>(&repo, rust)
            .expect("no infrastructure failure")
            .is_success()
    );
    let updated = aggregate::update::<Post, _>(
        &repo,
        post,
        PostChanges {
            post_status_id: Some(PostStatusId::new(2).unwrap()),
            ..PostChanges::default()
        },
        vec![post_text("fr", "Salut")],
    )
    .expect("no infrastructure failure")
    .success()
    .expect("post updated");
    assert_eq!(updated.entity.tag_ids, vec![sqlite]);
    assert_eq!(updated.entity.post_status_id, 2);
    assert_eq!(updated.languages(), vec!["fr"]);

    assert!(
        aggregate::delete::<Post, _>(&repo, post)
            .expect("no infrastructure failure")
            .is_success()
    );
    let mut conn = test_db.pool().get().expect("connection");
    let links = post_tags::table
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count post tags");
    assert_eq!(links, 0);
}

#[test]
fn service_errors_keep_infrastructure_separate() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let result: Result<(), ServiceError> = repo.transaction(|conn| {
        EntityStore::<Category>::update_entity(
            conn,
            CategoryId::new(77).unwrap(),
            &CategoryChanges::default(),
        )?;
        Ok(())
    });
    assert!(matches!(
        result,
        Err(ServiceError::Rejected(r)) if r.kind == RejectionKind::NotFound
    ));
}

#[test]
fn concurrent_updates_of_one_category_both_commit() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let id = create_category(&repo, vec![title("en", "Books")]);
    let barrier = Barrier::new(2);

    let (first, second) = thread::scope(|scope| {
        let first = scope.spawn(|| {
            barrier.wait();
            aggregate::update::<Category, _>(
                &repo,
                id,
                CategoryChanges::default(),
                vec![title("en", "Books"), title("fr", "Livres")],
            )
        });
        let second = scope.spawn(|| {
            barrier.wait();
            aggregate::update::<Category, _>(
                &repo,
                id,
                CategoryChanges {
                    is_active: Some(false),
                },
                vec![title("en", "Books"), title("ru", "Книги")],
            )
        });
        (
            first.join().expect("first writer"),
            second.join().expect("second writer"),
        )
    });

    assert!(first.expect("first update waits for the lock").is_success());
    assert!(second.expect("second update waits for the lock").is_success());

    let stored = aggregate::get_one::<Category, _>(&repo, id)
        .expect("read")
        .expect("category exists");
    assert!(!stored.entity.is_active);
    let languages = stored.languages();
    assert!(languages == vec!["en", "fr"] || languages == vec!["en", "ru"]);
}

#[test]
fn concurrent_update_and_delete_run_in_sequence() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let id = create_category(&repo, vec![title("en", "Books")]);
    let barrier = Barrier::new(2);

    let (updated, deleted) = thread::scope(|scope| {
        let updater = scope.spawn(|| {
            barrier.wait();
            aggregate::update::<Category, _>(
                &repo,
                id,
                CategoryChanges::default(),
                vec![title("fr", "Livres")],
            )
        });
        let deleter = scope.spawn(|| {
            barrier.wait();
            aggregate::delete::<Category, _>(&repo, id)
        });
        (
            updater.join().expect("updater"),
            deleter.join().expect("deleter"),
        )
    });

    let deleted = deleted.expect("delete waits for the lock");
    assert!(deleted.is_success());
    // The update either committed before the delete or found the row gone.
    let updated = updated.expect("update waits for the lock");
    if let Some(rejection) = updated.rejection() {
        assert_eq!(rejection.kind, RejectionKind::NotFound);
    }
    assert!(aggregate::get_one::<Category, _>(&repo, id).expect("read").is_none());

    let mut conn = test_db.pool().get().expect("connection");
    let remaining = category_translations::table
        .count()
        .get_result::<i64>(&mut conn)
        .expect("count translations");
    assert_eq!(remaining, 0);
}
