use thiserror::Error;

/// Failures that abort a whole `import_feed` call.
#[derive(Error, Debug)]
pub enum ImportError {
	#[error("invalid argument: {0}")]
	InvalidArgument(&'static str),

	#[error("database error: {0}")]
	Database(#[from] rusqlite::Error),

	#[error("failed to get database connection: {0}")]
	Pool(#[from] r2d2::Error),

	#[error("import task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
