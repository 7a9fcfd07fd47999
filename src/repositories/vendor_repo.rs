// src/repositories/vendor_repo.rs

use crate::db::connection::SqlitePool;
use crate::models::vendor::{Product, Vendor};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use anyhow::{Result, Context};
use tokio::task;

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
	Ok(Product {
		id: Some(row.get(0)?),
		name: row.get(1)?,
		version: row.get(2)?,
		vendor_id: row.get(3)?,
	})
}

/// Looks a vendor up by exact, case-sensitive name.
pub fn find_vendor_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Vendor>> {
	conn.query_row(
		"SELECT id, name FROM vendor WHERE name = ?1 ORDER BY id LIMIT 1",
		params![name],
		|row| Ok(Vendor { id: Some(row.get(0)?), name: row.get(1)? }),
	)
		.optional()
}

pub fn insert_vendor(conn: &Connection, name: &str) -> rusqlite::Result<Vendor> {
	conn.execute("INSERT INTO vendor (name) VALUES (?1)", params![name])?;
	Ok(Vendor {
		id: Some(conn.last_insert_rowid()),
		name: name.to_string(),
	})
}

/// Returns the existing vendor called `name`, inserting it first if needed.
///
/// Nothing at the storage level stops two writers that both miss the lookup
/// from inserting the same name twice.
pub fn find_or_create_vendor(conn: &Connection, name: &str) -> rusqlite::Result<Vendor> {
	match find_vendor_by_name(conn, name)? {
		Some(vendor) => Ok(vendor),
		None => insert_vendor(conn, name),
	}
}

pub fn find_product(
	conn: &Connection,
	name: &str,
	version: &str,
	vendor_id: i64,
) -> rusqlite::Result<Option<Product>> {
	conn.query_row(
		"SELECT id, name, version, vendor_id FROM product
		 WHERE name = ?1 AND version = ?2 AND vendor_id = ?3
		 ORDER BY id LIMIT 1",
		params![name, version, vendor_id],
		product_from_row,
	)
		.optional()
}

pub fn insert_product(conn: &Connection, product: &Product) -> rusqlite::Result<Product> {
	conn.execute(
		"INSERT INTO product (name, version, vendor_id) VALUES (?1, ?2, ?3)",
		params![product.name, product.version, product.vendor_id],
	)?;
	Ok(Product {
		id: Some(conn.last_insert_rowid()),
		..product.clone()
	})
}

pub fn find_or_create_product(
	conn: &Connection,
	name: &str,
	version: &str,
	vendor_id: i64,
) -> rusqlite::Result<Product> {
	match find_product(conn, name, version, vendor_id)? {
		Some(product) => Ok(product),
		None => insert_product(conn, &Product::new(name.to_string(), version.to_string(), vendor_id)),
	}
}

/// Read access to imported products.
pub struct ProductRepository {
	pool: Arc<SqlitePool>,
}

impl ProductRepository {
	pub fn new(pool: Arc<SqlitePool>) -> Self {
		Self { pool }
	}

	pub async fn find_all_order_by_version(&self) -> Result<Vec<Product>> {
		let pool = self.pool.clone();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			let mut stmt = conn.prepare(
				"SELECT id, name, version, vendor_id FROM product ORDER BY version ASC, id ASC"
			)?;

			let products = stmt.query_map([], product_from_row)?;
			products
				.collect::<rusqlite::Result<Vec<_>>>()
				.context("Failed to collect products")
		})
			.await
			.context("Failed to execute database operation")?
	}

	pub async fn find_by_name(&self, name: &str) -> Result<Vec<Product>> {
		let pool = self.pool.clone();
		let name = name.to_string();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			let mut stmt = conn.prepare(
				"SELECT id, name, version, vendor_id FROM product WHERE name = ?1 ORDER BY id"
			)?;

			let products = stmt.query_map([name], product_from_row)?;
			products
				.collect::<rusqlite::Result<Vec<_>>>()
				.context("Failed to collect products")
		})
			.await
			.context("Failed to execute database operation")?
	}

	/// First product with this name and version, from whichever vendor.
	pub async fn find_by_name_and_version(&self, name: &str, version: &str) -> Result<Option<Product>> {
		let pool = self.pool.clone();
		let name = name.to_string();
		let version = version.to_string();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			conn.query_row(
				"SELECT id, name, version, vendor_id FROM product
				 WHERE name = ?1 AND version = ?2 ORDER BY id LIMIT 1",
				params![name, version],
				product_from_row,
			)
				.optional()
				.context("Failed to query product")
		})
			.await
			.context("Failed to execute database operation")?
	}
}
