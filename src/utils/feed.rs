use crate::models::nvd::CveData;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads an NVD JSON feed from disk. A document consisting of `null` yields
/// `None`.
pub fn load_feed(path: &Path) -> Result<Option<CveData>> {
	let file = File::open(path)
		.with_context(|| format!("Failed to open feed file {:?}", path))?;

	serde_json::from_reader(BufReader::new(file))
		.with_context(|| format!("Failed to parse feed file {:?}", path))
}
