// src/main.rs

use anyhow::{Context, Result};
use log::info;
use nvd_advisory_importer::config::AppConfig;
use nvd_advisory_importer::db::{connection, schema};
use nvd_advisory_importer::importer::NvdImporter;
use nvd_advisory_importer::repositories::advisory_repo::AdvisoryRepository;
use nvd_advisory_importer::utils::{self, feed::load_feed};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
	utils::logger::init();
	info!("Starting NVD advisory import");

	let config = AppConfig::from_env_and_args()?;

	let pool = Arc::new(
		connection::establish_pool_with_path(config.database_path.clone(), config.pool_size)
			.context("Failed to establish database connection pool")?,
	);

	{
		let conn = pool.get().context("Failed to get database connection")?;
		schema::create_tables(&conn).context("Failed to create database tables")?;
	}
	info!("Database tables initialized successfully");

	let importer = NvdImporter::new(pool.clone());
	for path in &config.feed_paths {
		info!("Importing feed {:?}", path);
		let feed = load_feed(path)?;
		importer
			.import_feed(feed)
			.await
			.with_context(|| format!("Failed to import feed {:?}", path))?;
	}

	let total = AdvisoryRepository::new(pool).count_advisories().await?;
	info!("Database contains {} advisories", total);
	Ok(())
}
