use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

const DEFAULT_POOL_SIZE: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
	pub database_path: PathBuf,
	pub pool_size: u32,
	pub feed_paths: Vec<PathBuf>,
}

impl AppConfig {
	/// Reads `NVD_DB_PATH` / `NVD_DB_POOL_SIZE` and takes the feed files from
	/// the command line.
	pub fn from_env_and_args() -> Result<Self> {
		Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
	}

	fn from_sources(
		var: impl Fn(&str) -> Option<String>,
		args: impl IntoIterator<Item = String>,
	) -> Result<Self> {
		let database_path = var("NVD_DB_PATH")
			.map(PathBuf::from)
			.unwrap_or_else(default_db_path);

		let pool_size = match var("NVD_DB_POOL_SIZE") {
			Some(value) => value
				.parse::<u32>()
				.with_context(|| format!("Invalid NVD_DB_POOL_SIZE: {}", value))?,
			None => DEFAULT_POOL_SIZE,
		};
		if pool_size == 0 {
			return Err(anyhow!("NVD_DB_POOL_SIZE must be greater than zero"));
		}

		let feed_paths: Vec<PathBuf> = args.into_iter().map(PathBuf::from).collect();
		if feed_paths.is_empty() {
			return Err(anyhow!("Usage: nvd_advisory_importer <feed.json>..."));
		}

		Ok(Self {
			database_path,
			pool_size,
			feed_paths,
		})
	}
}

fn default_db_path() -> PathBuf {
	let mut db_path = dirs::data_dir()
		.map(|dir| dir.join("nvd-advisory"))
		.unwrap_or_else(|| PathBuf::from(".").join("database"));
	db_path.push("advisories.db");
	db_path
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	fn args(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| v.to_string()).collect()
	}

	#[test]
	fn test_defaults() {
		let config = AppConfig::from_sources(vars(&[]), args(&["nvdcve-1.0-2018.json"])).unwrap();
		assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
		assert!(config.database_path.ends_with("advisories.db"));
		assert_eq!(config.feed_paths, vec![PathBuf::from("nvdcve-1.0-2018.json")]);
	}

	#[test]
	fn test_environment_overrides() {
		let config = AppConfig::from_sources(
			vars(&[("NVD_DB_PATH", "/tmp/nvd.db"), ("NVD_DB_POOL_SIZE", "3")]),
			args(&["a.json", "b.json"]),
		)
			.unwrap();
		assert_eq!(config.database_path, PathBuf::from("/tmp/nvd.db"));
		assert_eq!(config.pool_size, 3);
		assert_eq!(config.feed_paths.len(), 2);
	}

	#[test]
	fn test_invalid_settings() {
		assert!(AppConfig::from_sources(vars(&[]), args(&[])).is_err());
		assert!(AppConfig::from_sources(vars(&[("NVD_DB_POOL_SIZE", "0")]), args(&["a.json"])).is_err());
		assert!(AppConfig::from_sources(vars(&[("NVD_DB_POOL_SIZE", "many")]), args(&["a.json"])).is_err());
	}
}
