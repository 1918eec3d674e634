//! Error types for the response layer

use http::header::InvalidHeaderValue;
use reinhardt_tables::TableError;
use thiserror::Error;

/// Errors raised while building a table response.
#[derive(Debug, Error)]
pub enum ViewError {
	/// The table pipeline failed.
	#[error(transparent)]
	Table(#[from] TableError),

	/// The exporter failed or none is configured.
	#[error("Export failed: {0}")]
	Export(String),

	/// A payload could not be serialized.
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// View settings could not be parsed.
	#[error("Invalid view settings: {0}")]
	Settings(#[from] toml::de::Error),

	/// A header value, such as a download filename, is not valid in HTTP.
	#[error("Invalid header value: {0}")]
	Header(#[from] InvalidHeaderValue),
}

/// Result type alias for view operations
pub type Result<T> = std::result::Result<T, ViewError>;
