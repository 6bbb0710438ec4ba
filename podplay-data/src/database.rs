// database.rs
//
// Copyright 2023 Jordan Petridis <jpetridis@gnome.org>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Database Setup. This is only public to help with some unit tests.

use diesel::prelude::*;
use diesel::r2d2;
use diesel::r2d2::ConnectionManager;
use diesel::sql_query;
use diesel::sql_types::{Integer, Text};

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use std::sync::LazyLock;

#[cfg(not(test))]
use crate::xdg_dirs;

use crate::errors::DataError;
use crate::schema::{episodes, podcasts};

type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[cfg(not(test))]
static POOL: LazyLock<Pool> = LazyLock::new(|| {
    let pathbuf = xdg_dirs::PODPLAY_XDG
        .place_data_file("podplay.db")
        .unwrap();
    let db_path = pathbuf.to_str().unwrap();
    init_pool(db_path)
});

// With cargo test the database file is shared between every [test]
// thread, so each test has to truncate_db() first and hold the lock
// from test_lock() for its whole body.
#[cfg(test)]
static TEMPDIR: LazyLock<tempfile::TempDir> = LazyLock::new(|| {
    tempfile::Builder::new()
        .prefix("podplay-data-tests")
        .tempdir()
        .unwrap()
});

#[cfg(test)]
static POOL: LazyLock<Pool> = LazyLock::new(|| {
    let pathbuf = TEMPDIR.path().join("podplay.db");
    let db_path = pathbuf.to_str().unwrap();
    init_pool(db_path)
});

#[cfg(test)]
static TEST_MUTEX: LazyLock<std::sync::Mutex<()>> = LazyLock::new(Default::default);

/// Serialize tests that touch the shared database file.
#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    TEST_MUTEX.lock().unwrap_or_else(|err| err.into_inner())
}

/// Get an r2d2 `SqliteConnection` pool.
pub(crate) fn connection() -> Pool {
    POOL.clone()
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    // SQLite keeps foreign keys off unless told otherwise, and the
    // episodes cascade depends on them.
    fn on_acquire(&self, con: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        sql_query("PRAGMA foreign_keys = ON")
            .execute(con)
            .map(|_| ())
            .map_err(r2d2::Error::QueryError)
    }
}

fn init_pool(db_path: &str) -> Pool {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)
        .expect("Failed to create pool.");

    {
        let mut db = pool.get().expect("Failed to initialize pool.");
        run_migration_on(&mut db).expect("Failed to run migrations during init.");
        validate_schema(&mut db).expect("The stored schema can not be used safely.");
    }
    info!("Database pool initialized.");
    pool
}

fn run_migration_on(
    con: &mut SqliteConnection,
) -> Result<Vec<diesel::migration::MigrationVersion<'_>>, DataError> {
    info!("Running DB Migrations...");
    con.run_pending_migrations(MIGRATIONS)
        .map_err(|err| DataError::DieselMigrationError(err.to_string()))
}

/// Remove all rows from both tables and reclaim the freed storage.
///
/// Foreign key enforcement is suspended so the two deletes can happen
/// in a single transaction in either order, and is restored right
/// after. The schema itself is left intact.
pub fn truncate_db() -> Result<(), DataError> {
    let db = connection();
    let mut con = db.get()?;

    sql_query("PRAGMA foreign_keys = OFF").execute(&mut con)?;
    let deleted = con.transaction::<(), DataError, _>(|con| {
        diesel::delete(podcasts::table).execute(con)?;
        diesel::delete(episodes::table).execute(con)?;
        Ok(())
    });
    sql_query("PRAGMA foreign_keys = ON").execute(&mut con)?;
    deleted?;

    sql_query("VACUUM").execute(&mut con)?;
    info!("Removed all rows from the database.");
    Ok(())
}

#[derive(QueryableByName, Debug, PartialEq, Eq)]
struct ColumnInfo {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    kind: String,
    #[diesel(sql_type = Integer)]
    required: i32,
    #[diesel(sql_type = Integer)]
    pk: i32,
}

#[derive(QueryableByName, Debug)]
struct ForeignKeyInfo {
    #[diesel(sql_type = Text)]
    parent: String,
    #[diesel(sql_type = Text)]
    origin: String,
    #[diesel(sql_type = Text)]
    target: String,
    #[diesel(sql_type = Text)]
    on_delete: String,
}

#[derive(QueryableByName, Debug)]
struct IndexInfo {
    #[diesel(sql_type = Text)]
    name: String,
}

fn column(name: &str, kind: &str, required: i32, pk: i32) -> ColumnInfo {
    ColumnInfo {
        name: name.to_owned(),
        kind: kind.to_owned(),
        required,
        pk,
    }
}

fn expected_podcasts() -> Vec<ColumnInfo> {
    vec![
        column("id", "INTEGER", 0, 1),
        column("feed_url", "TEXT", 1, 0),
        column("feed_title", "TEXT", 1, 0),
        column("feed_desc", "TEXT", 1, 0),
        column("image_url", "TEXT", 1, 0),
        column("last_updated", "INTEGER", 1, 0),
    ]
}

fn expected_episodes() -> Vec<ColumnInfo> {
    vec![
        column("guid", "TEXT", 1, 1),
        column("podcast_id", "INTEGER", 0, 0),
        column("title", "TEXT", 1, 0),
        column("description", "TEXT", 1, 0),
        column("media_url", "TEXT", 1, 0),
        column("mime_type", "TEXT", 1, 0),
        column("release_date", "INTEGER", 1, 0),
        column("duration", "TEXT", 1, 0),
    ]
}

fn check_table(
    con: &mut SqliteConnection,
    table: &str,
    expected: Vec<ColumnInfo>,
) -> Result<(), DataError> {
    let query = format!(
        "SELECT name, type AS kind, \"notnull\" AS required, pk \
         FROM pragma_table_info('{table}') ORDER BY cid"
    );
    let found = sql_query(query).load::<ColumnInfo>(con)?;

    if found != expected {
        return Err(DataError::SchemaMismatch {
            table: table.to_owned(),
            details: format!("expected columns {expected:?}, found {found:?}"),
        });
    }
    Ok(())
}

fn check_episodes_cascade(con: &mut SqliteConnection) -> Result<(), DataError> {
    let found = sql_query(
        "SELECT \"table\" AS parent, \"from\" AS origin, \"to\" AS target, on_delete \
         FROM pragma_foreign_key_list('episodes')",
    )
    .load::<ForeignKeyInfo>(con)?;

    let matches = found.len() == 1
        && found.iter().all(|fk| {
            fk.parent == "podcasts"
                && fk.origin == "podcast_id"
                && fk.target == "id"
                && fk.on_delete == "CASCADE"
        });

    if !matches {
        return Err(DataError::SchemaMismatch {
            table: "episodes".to_owned(),
            details: format!(
                "expected a single cascading foreign key \
                 podcast_id -> podcasts(id), found {found:?}"
            ),
        });
    }
    Ok(())
}

fn check_episodes_index(con: &mut SqliteConnection) -> Result<(), DataError> {
    let found = sql_query("SELECT name FROM pragma_index_list('episodes')")
        .load::<IndexInfo>(con)?;

    if !found.iter().any(|i| i.name == "index_episodes_podcast_id") {
        return Err(DataError::SchemaMismatch {
            table: "episodes".to_owned(),
            details: format!("index index_episodes_podcast_id is missing, found {found:?}"),
        });
    }
    Ok(())
}

/// Compare the stored table definitions against the ones this version
/// of the library expects.
///
/// A database that fails this check can not be used safely, which makes
/// a mismatch fatal during startup rather than something to recover
/// from at runtime.
pub fn validate_schema(con: &mut SqliteConnection) -> Result<(), DataError> {
    check_table(con, "podcasts", expected_podcasts())?;
    check_table(con, "episodes", expected_episodes())?;
    check_episodes_cascade(con)?;
    check_episodes_index(con)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use crate::dbqueries;
    use crate::models::{Insert, NewEpisodeBuilder, NewPodcastBuilder};

    #[test]
    fn test_truncate_db() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        let pd = NewPodcastBuilder::default()
            .feed_url("https://example.com/feed.rss")
            .feed_title("Example")
            .build()
            .unwrap()
            .to_podcast()?;
        NewEpisodeBuilder::default()
            .guid("example-ep-1")
            .podcast_id(pd.id())
            .title("Episode 1")
            .build()
            .unwrap()
            .insert()?;

        truncate_db()?;
        assert!(dbqueries::get_podcasts()?.is_empty());
        assert!(dbqueries::get_episodes()?.is_empty());

        // The schema survives and accepts new rows.
        let pd = NewPodcastBuilder::default()
            .feed_url("https://example.com/feed.rss")
            .feed_title("Example")
            .build()
            .unwrap()
            .to_podcast()?;
        assert_eq!(dbqueries::get_podcasts()?, vec![pd]);
        Ok(())
    }

    #[test]
    fn test_validate_schema_after_migrations() -> Result<()> {
        let _lock = test_lock();

        let db = connection();
        let mut con = db.get()?;
        assert!(validate_schema(&mut con).is_ok());
        Ok(())
    }

    #[test]
    fn test_validate_schema_rejects_foreign_database() -> Result<()> {
        let file = tempfile::Builder::new().suffix("-podplay.db").tempfile()?;
        let mut con = SqliteConnection::establish(file.path().to_str().unwrap())?;

        sql_query("CREATE TABLE podcasts (id INTEGER PRIMARY KEY, feed_url TEXT)")
            .execute(&mut con)?;

        let err = validate_schema(&mut con);
        assert!(matches!(err, Err(DataError::SchemaMismatch { .. })));
        Ok(())
    }

    #[test]
    fn test_foreign_keys_are_enforced() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        // No podcast with id 42 exists, so the insert has to fail.
        let orphan = NewEpisodeBuilder::default()
            .guid("dangling")
            .podcast_id(42)
            .title("Orphan")
            .build()
            .unwrap();
        assert!(orphan.insert().is_err());
        Ok(())
    }
}
