#[macro_use]
extern crate diesel;

use anyhow::{anyhow, Result as Fallible};
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use eetgids_core::usecases as uc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
};

mod models;
mod repo_impl;
mod schema;


const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Manager = r2d2::ConnectionManager<SqliteConnection>;
type Pool = r2d2::Pool<Manager>;
type Pooled = r2d2::PooledConnection<Manager>;

/// Settings applied to every pooled connection.
///
/// The encoding only takes effect before the first table is created.
/// Reviews, favorites, claims and photos of a restaurant are removed
/// through `ON DELETE CASCADE`, which needs enforced foreign keys.
const PRAGMAS: &[(&str, &str)] = &[
    ("journal_mode", "WAL"),
    ("synchronous", "NORMAL"),
    ("wal_autocheckpoint", "1000"),
    ("secure_delete", "0"),
    ("automatic_index", "1"),
    ("foreign_keys", "1"),
    ("defer_foreign_keys", "1"),
    ("recursive_triggers", "1"),
    ("encoding", "'UTF-8'"),
];

fn pragma_statements() -> String {
    PRAGMAS
        .iter()
        .map(|(name, value)| format!("PRAGMA {name} = {value};\n"))
        .collect()
}

pub fn initialize_connection(conn: &mut SqliteConnection) -> diesel::QueryResult<()> {
    conn.batch_execute(&pragma_statements())
}

#[derive(Debug)]
struct ConnectionSettings;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionSettings {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        initialize_connection(conn).map_err(r2d2::Error::QueryError)
    }
}

fn checkout(pool: &Pool, access: &str) -> Fallible<RefCell<Pooled>> {
    let conn = pool.get().inspect_err(|err| {
        log::error!("No {access} database connection available: {err}");
    })?;
    Ok(RefCell::new(conn))
}

/// Read access to the restaurant directory.
///
/// Any number of readers may be active as long as
/// nobody holds a [`DbReadWrite`].
pub struct DbReadOnly<'a> {
    _pool: RwLockReadGuard<'a, Pool>,
    conn: RefCell<Pooled>,
}

/// Exclusive write access to the restaurant directory.
pub struct DbReadWrite<'a> {
    _pool: RwLockWriteGuard<'a, Pool>,
    conn: RefCell<Pooled>,
}

/// Borrowed connection of a running transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl DbReadWrite<'_> {
    /// Runs `f` as a single transaction.
    ///
    /// An error of `f` rolls back everything and is returned as is.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        use diesel::Connection as _;
        let mut failure = None;
        let result = self.conn.borrow_mut().transaction(|conn| {
            let conn: &mut SqliteConnection = conn;
            let tx = DbConnection {
                conn: RefCell::new(conn),
            };
            f(&tx).map_err(|err| {
                failure = Some(err.into());
                diesel::result::Error::RollbackTransaction
            })
        });
        result.map_err(|err| match failure.take() {
            Some(failure) => failure,
            None => uc::Error::Repo(repo_impl::from_diesel_err(err)),
        })
    }

    fn sqlite_conn(&self) -> RefMut<Pooled> {
        self.conn.borrow_mut()
    }
}

/// Hands out database access to request handlers.
///
/// SQLite fails with `SQLITE_LOCKED` if two connections write
/// at the same time. Writers therefore wait for each other and
/// for all readers.
#[derive(Clone)]
pub struct Connections {
    pool: Arc<RwLock<Pool>>,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // r2d2 keeps retrying (and logging) if the file cannot be opened
        use diesel::Connection as _;
        SqliteConnection::establish(url)
            .map_err(|err| anyhow!("Cannot open database '{url}': {err}"))?;
        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionSettings))
            .build(Manager::new(url))?;
        let mut conn = pool.get()?;
        // Leftovers of a WAL file from a previous run
        conn.batch_execute("PRAGMA wal_checkpoint(TRUNCATE);")?;
        drop(conn);
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        let pool = self.pool.read();
        let conn = checkout(&pool, "read-only")?;
        Ok(DbReadOnly { _pool: pool, conn })
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        let pool = self.pool.write();
        let conn = checkout(&pool, "read/write")?;
        Ok(DbReadWrite { _pool: pool, conn })
    }
}

pub fn run_embedded_database_migrations(db: DbReadWrite<'_>) -> Fallible<()> {
    let mut conn = db.sqlite_conn();
    let pending = conn
        .pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Cannot list database migrations: {err}"))?;
    if pending.is_empty() {
        log::debug!("Database schema is up to date");
        return Ok(());
    }
    log::info!("Migrating database schema ({} pending)", pending.len());
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to migrate database schema: {err}"))?;
    Ok(())
}
