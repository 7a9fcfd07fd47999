use rusqlite::Connection;
use anyhow::{Result, Context};

/// Creates the advisory tables if they do not exist yet.
///
/// Vendor names, product triples and CVE ids are deliberately left without
/// UNIQUE constraints: uniqueness is only upheld by lookup-before-insert.
pub fn create_tables(conn: &Connection) -> Result<()> {
	conn.execute_batch(
		"
		CREATE TABLE IF NOT EXISTS vendor (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL
		);

		CREATE INDEX IF NOT EXISTS idx_vendor_name ON vendor(name);

		CREATE TABLE IF NOT EXISTS product (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			version TEXT NOT NULL,
			vendor_id INTEGER NOT NULL REFERENCES vendor(id)
		);

		CREATE INDEX IF NOT EXISTS idx_product_lookup
		ON product(name, version, vendor_id);

		CREATE TABLE IF NOT EXISTS advisory (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			cve_id TEXT NOT NULL,
			problem_type TEXT NOT NULL,
			published_date TEXT,
			last_modified_date TEXT,
			description TEXT,
			severity TEXT
		);

		CREATE INDEX IF NOT EXISTS idx_advisory_cve ON advisory(cve_id);

		CREATE TABLE IF NOT EXISTS advisory_product (
			advisory_id INTEGER NOT NULL REFERENCES advisory(id),
			product_id INTEGER NOT NULL REFERENCES product(id),
			PRIMARY KEY (advisory_id, product_id)
		);

		CREATE TABLE IF NOT EXISTS config_node (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			advisory_id INTEGER NOT NULL REFERENCES advisory(id),
			operator TEXT NOT NULL,
			parent_id INTEGER REFERENCES config_node(id)
		);

		CREATE INDEX IF NOT EXISTS idx_config_node_advisory ON config_node(advisory_id);

		CREATE TABLE IF NOT EXISTS config_node_cpe (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			config_node_id INTEGER NOT NULL REFERENCES config_node(id),
			cpe22_uri TEXT,
			cpe23_uri TEXT,
			vulnerable INTEGER NOT NULL
		);

		CREATE INDEX IF NOT EXISTS idx_config_node_cpe_node ON config_node_cpe(config_node_id);
		"
	).context("Failed to create tables")?;

	Ok(())
}
