use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises logging from `RUST_LOG`, defaulting to `info`. `r2d2` is
/// capped at `warn`.
pub fn init() {
	Builder::from_env(Env::default().default_filter_or("info"))
		.filter_module("r2d2", LevelFilter::Warn)
		.format_timestamp_millis()
		.format_module_path(true)
		.init();
}
