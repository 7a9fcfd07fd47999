// src/repositories/advisory_repo.rs

use crate::db::connection::SqlitePool;
use crate::models::advisory::{Advisory, ConfigNode, ConfigNodeCpe};
use crate::models::vendor::Product;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::sync::Arc;
use anyhow::{Result, Context};
use tokio::task;

const STORED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_stored_date(date: Option<DateTime<Utc>>) -> Option<String> {
	date.map(|d| d.format(STORED_DATE_FORMAT).to_string())
}

fn parse_stored_date(date: Option<String>) -> Option<DateTime<Utc>> {
	date.and_then(|d| NaiveDateTime::parse_from_str(&d, STORED_DATE_FORMAT).ok())
		.map(|d| d.and_utc())
}

/// Persists an advisory together with its product links and returns it with
/// the assigned id.
///
/// No check for an existing row with the same CVE id is made, so importing
/// the same item twice yields two advisories.
pub fn insert_advisory(conn: &Connection, advisory: &Advisory) -> rusqlite::Result<Advisory> {
	conn.execute(
		"INSERT INTO advisory (cve_id, problem_type, published_date, last_modified_date, description, severity)
		 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
		params![
			advisory.cve_id,
			advisory.problem_type,
			format_stored_date(advisory.published_date),
			format_stored_date(advisory.last_modified_date),
			advisory.description,
			advisory.severity,
		],
	)?;
	let advisory_id = conn.last_insert_rowid();

	let mut stmt = conn.prepare(
		"INSERT INTO advisory_product (advisory_id, product_id) VALUES (?1, ?2)"
	)?;
	for product in &advisory.products {
		stmt.execute(params![advisory_id, product.id])?;
	}

	Ok(Advisory {
		id: Some(advisory_id),
		..advisory.clone()
	})
}

/// Read access to imported advisories and their configuration trees.
pub struct AdvisoryRepository {
	pool: Arc<SqlitePool>,
}

impl AdvisoryRepository {
	pub fn new(pool: Arc<SqlitePool>) -> Self {
		Self { pool }
	}

	pub async fn count_advisories(&self) -> Result<i64> {
		let pool = self.pool.clone();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			conn.query_row("SELECT COUNT(*) FROM advisory", [], |row| row.get::<_, i64>(0))
				.context("Failed to count advisories")
		})
			.await
			.context("Failed to execute database operation")?
	}

	/// Every advisory row for `cve_id`, oldest first. Products are not loaded.
	pub async fn find_by_cve_id(&self, cve_id: &str) -> Result<Vec<Advisory>> {
		let pool = self.pool.clone();
		let cve_id = cve_id.to_string();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			let mut stmt = conn.prepare(
				"SELECT id, cve_id, problem_type, published_date, last_modified_date, description, severity
				 FROM advisory WHERE cve_id = ?1 ORDER BY id"
			)?;

			let advisories = stmt.query_map([cve_id], |row| {
				Ok(Advisory {
					id: Some(row.get(0)?),
					cve_id: row.get(1)?,
					problem_type: row.get(2)?,
					published_date: parse_stored_date(row.get(3)?),
					last_modified_date: parse_stored_date(row.get(4)?),
					description: row.get(5)?,
					severity: row.get(6)?,
					products: HashSet::new(),
				})
			})?;

			advisories
				.collect::<rusqlite::Result<Vec<_>>>()
				.context("Failed to collect advisories")
		})
			.await
			.context("Failed to execute database operation")?
	}

	pub async fn products_for_advisory(&self, advisory_id: i64) -> Result<Vec<Product>> {
		let pool = self.pool.clone();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			let mut stmt = conn.prepare(
				"SELECT p.id, p.name, p.version, p.vendor_id
				 FROM product p
				 JOIN advisory_product ap ON ap.product_id = p.id
				 WHERE ap.advisory_id = ?1
				 ORDER BY p.id"
			)?;

			let products = stmt.query_map([advisory_id], |row| {
				Ok(Product {
					id: Some(row.get(0)?),
					name: row.get(1)?,
					version: row.get(2)?,
					vendor_id: row.get(3)?,
				})
			})?;

			products
				.collect::<rusqlite::Result<Vec<_>>>()
				.context("Failed to collect advisory products")
		})
			.await
			.context("Failed to execute database operation")?
	}

	/// Configuration nodes in insertion order, so roots precede their children.
	pub async fn config_nodes_for_advisory(&self, advisory_id: i64) -> Result<Vec<ConfigNode>> {
		let pool = self.pool.clone();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			let mut stmt = conn.prepare(
				"SELECT id, advisory_id, operator, parent_id
				 FROM config_node WHERE advisory_id = ?1 ORDER BY id"
			)?;

			let nodes = stmt.query_map([advisory_id], |row| {
				Ok(ConfigNode {
					id: Some(row.get(0)?),
					advisory_id: row.get(1)?,
					operator: row.get(2)?,
					parent_id: row.get(3)?,
				})
			})?;

			nodes
				.collect::<rusqlite::Result<Vec<_>>>()
				.context("Failed to collect configuration nodes")
		})
			.await
			.context("Failed to execute database operation")?
	}

	pub async fn cpes_for_config_node(&self, config_node_id: i64) -> Result<Vec<ConfigNodeCpe>> {
		let pool = self.pool.clone();
		task::spawn_blocking(move || {
			let conn = pool.get().context("Failed to get database connection")?;
			let mut stmt = conn.prepare(
				"SELECT id, config_node_id, cpe22_uri, cpe23_uri, vulnerable
				 FROM config_node_cpe WHERE config_node_id = ?1 ORDER BY id"
			)?;

			let cpes = stmt.query_map([config_node_id], |row| {
				Ok(ConfigNodeCpe {
					id: Some(row.get(0)?),
					config_node_id: row.get(1)?,
					cpe22_uri: row.get(2)?,
					cpe23_uri: row.get(3)?,
					vulnerable: row.get(4)?,
				})
			})?;

			cpes
				.collect::<rusqlite::Result<Vec<_>>>()
				.context("Failed to collect configuration CPEs")
		})
			.await
			.context("Failed to execute database operation")?
	}
}
