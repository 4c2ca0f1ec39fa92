// {{{ Imports
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use include_dir::{include_dir, Dir};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite_migration::Migrations;
use tracing::info;

use crate::context::paths::KaguraPaths;
// }}}

pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// Opens a single connection, bringing the schema up to date.
pub fn open_connection(db_path: &Path) -> anyhow::Result<rusqlite::Connection> {
	let mut conn = rusqlite::Connection::open(db_path)
		.with_context(|| format!("Could not open sqlite database at {db_path:?}"))?;
	conn.pragma_update(None, "journal_mode", "WAL")?;
	conn.pragma_update(None, "synchronous", "NORMAL")?;

	// {{{ Run migrations
	static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/migrations");
	static MIGRATIONS: LazyLock<Migrations> = LazyLock::new(|| {
		Migrations::from_directory(&MIGRATIONS_DIR).expect("Could not load migrations")
	});

	MIGRATIONS
		.to_latest(&mut conn)
		.with_context(|| "Could not run migrations")?;
	// }}}

	Ok(conn)
}

pub fn connect_db(paths: &KaguraPaths) -> anyhow::Result<SqlitePool> {
	let db_path = paths.db_path();
	open_connection(db_path)?;
	info!("✅ Ensured db schema is up to date");

	Pool::new(SqliteConnectionManager::file(db_path))
		.with_context(|| "Could not open sqlite database.")
}
