//! Maps NVD feed items onto advisories, vendors, products and
//! configuration trees.

pub mod configurations;
pub mod dates;
pub mod error;
pub mod references;

use crate::db::connection::SqlitePool;
use crate::models::advisory::Advisory;
use crate::models::nvd::{Cve, CveData, CveItem};
use crate::repositories::advisory_repo;
use error::{ImportError, Result};
use log::{info, warn};
use rusqlite::Connection;
use std::sync::Arc;
use tokio::task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
	pub imported: usize,
	pub skipped: usize,
}

#[derive(Clone)]
pub struct NvdImporter {
	pool: Arc<SqlitePool>,
}

impl NvdImporter {
	pub fn new(pool: Arc<SqlitePool>) -> Self {
		Self { pool }
	}

	/// Imports every item of `feed` inside a single transaction on a fresh
	/// connection.
	///
	/// Items without CVE metadata are skipped. Any database failure rolls
	/// back the whole feed. A missing payload or an empty item list is
	/// rejected before any work is done.
	pub async fn import_feed(&self, feed: Option<CveData>) -> Result<ImportSummary> {
		let feed = feed.ok_or(ImportError::InvalidArgument("cveData"))?;
		let items = match feed.cve_items {
			Some(items) if !items.is_empty() => items,
			_ => return Err(ImportError::InvalidArgument("cveData.items")),
		};

		let pool = self.pool.clone();
		task::spawn_blocking(move || -> Result<ImportSummary> {
			let mut conn = pool.get()?;
			let tx = conn.transaction()?;

			let mut summary = ImportSummary::default();
			for item in &items {
				if import_item(&tx, item)? {
					summary.imported += 1;
				} else {
					summary.skipped += 1;
				}
			}

			tx.commit()?;
			info!(
				"Feed import completed: {} imported, {} skipped",
				summary.imported, summary.skipped
			);
			Ok(summary)
		})
			.await?
	}
}

/// Imports one feed item. Returns `false` when the item was skipped.
fn import_item(conn: &Connection, item: &CveItem) -> rusqlite::Result<bool> {
	let cve = &item.cve;
	let Some(meta) = cve.data_meta.as_ref() else {
		warn!("invalid metadata");
		return Ok(false);
	};

	let mut advisory = Advisory::new(meta.id.clone());
	info!("Processing {}", advisory.cve_id);

	advisory.problem_type = problem_type_summary(cve);
	advisory.published_date = dates::parse_feed_date(item.published_date.as_deref());
	advisory.last_modified_date = dates::parse_feed_date(item.last_modified_date.as_deref());
	advisory.description = english_description(cve);
	advisory.severity = item
		.impact
		.as_ref()
		.and_then(|impact| impact.base_metric_v2.as_ref())
		.and_then(|metric| metric.severity.clone());

	advisory.products = references::resolve_products(conn, cve)?;
	let advisory = advisory_repo::insert_advisory(conn, &advisory)?;

	if let (Some(advisory_id), Some(nodes)) = (
		advisory.id,
		item.configurations.as_ref().and_then(|c| c.nodes.as_ref()),
	) {
		info!("Now save configurations for {}", advisory.cve_id);
		configurations::save_configurations(conn, advisory_id, nodes)?;
	}

	Ok(true)
}

/// Joins every weakness description, each followed by a comma.
fn problem_type_summary(cve: &Cve) -> String {
	let Some(data) = cve.problem_type.as_ref().and_then(|p| p.data.as_ref()) else {
		return String::new();
	};

	let mut summary = String::new();
	for entry in data {
		for description in &entry.description {
			summary.push_str(&description.value);
			summary.push(',');
		}
	}
	summary
}

/// Text of the last description tagged `en`, ignoring case.
fn english_description(cve: &Cve) -> Option<String> {
	cve.description
		.as_ref()
		.and_then(|d| d.data.as_ref())?
		.iter()
		.filter(|d| d.lang.eq_ignore_ascii_case("en"))
		.last()
		.map(|d| d.value.clone())
}
