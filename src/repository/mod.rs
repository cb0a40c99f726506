use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::db::{DbConnection, DbPool};

use crate::domain::language::Language;
use crate::domain::post::PostStatus;
use crate::domain::translation::{Aggregate, Translation};
use crate::domain::types::LanguageCode;

pub mod category;
pub mod errors;
pub mod language;
pub mod post;
pub mod tag;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    ///
    /// Writers queue on the SQLite lock for up to [`BUSY_TIMEOUT_MS`].
    fn conn(&self) -> RepositoryResult<DbConnection> {
        let mut conn = self.pool.get()?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))?;
        Ok(conn)
    }
}

/// Scope in which repository work runs.
///
/// `read` hands out a connection for plain queries; `transaction` commits
/// when the closure returns `Ok` and rolls back every write made through the
/// connection when it returns `Err`.
pub trait UnitOfWork {
    /// Connection type the stores are implemented for.
    type Conn;

    /// Run read-only work on a connection.
    fn read<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut Self::Conn) -> RepositoryResult<T>;

    /// Run `f` inside a single transaction.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Conn) -> Result<T, E>,
        E: From<RepositoryError>;
}

/// Persistence of the aggregate row itself.
pub trait EntityStore<A: Aggregate> {
    /// Insert a new row, stamping its creation time.
    fn create_entity(&mut self, new: &A::New) -> RepositoryResult<A::Id>;
    /// Apply `changes`, stamping the update time.
    fn update_entity(&mut self, id: A::Id, changes: &A::Changes) -> RepositoryResult<A::Id>;
    /// Delete the row. Fails with a conflict while translations remain.
    fn delete_entity(&mut self, id: A::Id) -> RepositoryResult<()>;
    /// Retrieve a row by its identifier.
    fn fetch_entity(&mut self, id: A::Id) -> RepositoryResult<Option<A>>;
    /// List every row ordered by identifier.
    fn list_entities(&mut self) -> RepositoryResult<Vec<A>>;
}

/// Persistence of the translation rows owned by an aggregate.
pub trait TranslationStore<A: Aggregate> {
    /// Stored translations ordered by language code.
    fn list_translations(&mut self, id: A::Id) -> RepositoryResult<Vec<Translation<A::Fields>>>;
    /// Insert a row for a language that has none yet.
    fn insert_translation(
        &mut self,
        id: A::Id,
        translation: &Translation<A::Fields>,
    ) -> RepositoryResult<()>;
    /// Overwrite the text of an existing row.
    fn update_translation(
        &mut self,
        id: A::Id,
        translation: &Translation<A::Fields>,
    ) -> RepositoryResult<()>;
    /// Remove the row for `language`.
    fn delete_translation(&mut self, id: A::Id, language: &LanguageCode) -> RepositoryResult<()>;
}

/// Read-only access to the language catalog.
pub trait LanguageReader {
    /// List the catalog ordered by code.
    fn list_languages(&mut self) -> RepositoryResult<Vec<Language>>;
    /// Look up a language by its normalized code.
    fn find_language(&mut self, code: &LanguageCode) -> RepositoryResult<Option<Language>>;
}

/// Read-only access to the post status catalog.
pub trait PostStatusReader {
    /// List the catalog ordered by identifier.
    fn list_post_statuses(&mut self) -> RepositoryResult<Vec<PostStatus>>;
}

enum TransactionError<E> {
    Aborted(E),
    Database(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TransactionError<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

impl UnitOfWork for DieselRepository {
    type Conn = SqliteConnection;

    fn read<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    {
        let mut conn = self.conn()?;
        f(&mut *conn)
    }

    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut conn = self.conn()?;
        let conn: &mut SqliteConnection = &mut conn;

        // BEGIN IMMEDIATE: the write lock is held from the first statement.
        conn.immediate_transaction::<T, TransactionError<E>, _>(|conn| {
            f(conn).map_err(TransactionError::Aborted)
        })
        .map_err(|err| match err {
            TransactionError::Aborted(err) => err,
            TransactionError::Database(err) => E::from(RepositoryError::from(err)),
        })
    }
}
