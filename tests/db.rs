use diesel::prelude::*;
use pushkind_blog::schema::{languages, post_statuses};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn migrations_seed_the_catalogs() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("connection");

    let codes = languages::table
        .select(languages::code)
        .order(languages::id.asc())
        .load::<String>(&mut conn)
        .expect("languages");
    assert_eq!(codes, vec!["en", "fr", "en-CA", "fr-CA", "ru"]);

    let statuses = post_statuses::table
        .count()
        .get_result::<i64>(&mut conn)
        .expect("post statuses");
    assert_eq!(statuses, 3);
}
