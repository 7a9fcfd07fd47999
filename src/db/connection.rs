use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::PathBuf;
use anyhow::{Result, Context};
use log::info;

pub type SqlitePool = Pool<SqliteConnectionManager>;

/// Establishes a connection pool for the database at `path`.
///
/// Foreign keys are switched on for every pooled connection so that a
/// configuration node can only point at a parent that already exists.
pub fn establish_pool_with_path(path: PathBuf, max_size: u32) -> Result<SqlitePool> {
	info!("SQLite database will be located at: {:?}", path);

	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)
			.context("Failed to create database directory")?;
	}

	let manager = SqliteConnectionManager::file(path)
		.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

	let pool = Pool::builder()
		.max_size(max_size)
		.build(manager)
		.context("Failed to create SQLite connection pool")?;

	info!("SQLite connection pool established successfully");
	Ok(pool)
}
