//! Error types for table schemas and the request pipeline

use reinhardt_columns::ColumnError;
use thiserror::Error;

/// Errors raised by a data source while filtering, ordering, counting or projecting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
	/// A lookup, ordering or projection named a field the data source does not know.
	#[error("Cannot resolve keyword '{0}' into field")]
	UnknownField(String),

	/// A `regex` / `iregex` lookup carried an invalid pattern.
	#[error("Invalid pattern '{pattern}': {message}")]
	InvalidPattern {
		/// The rejected pattern.
		pattern: String,
		/// Parser message.
		message: String,
	},

	/// Any other failure reported by the backend.
	#[error("Data source error: {0}")]
	Backend(String),
}

/// Errors raised while running a table pipeline.
///
/// Every stage funnels into this type; the response layer decides how much of
/// it is exposed to the client.
#[derive(Debug, Error)]
pub enum TableError {
	/// The table is missing configuration it needs, e.g. a data source.
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	/// A cell failed to render.
	#[error("Render error: {0}")]
	Render(#[from] ColumnError),

	/// The data source failed.
	#[error("Query error: {0}")]
	Query(#[from] QueryError),

	/// A request parameter could not be interpreted.
	#[error("Invalid parameter '{name}': {message}")]
	InvalidParameter {
		/// Parameter name as sent by the client.
		name: String,
		/// What was wrong with it.
		message: String,
	},
}

impl TableError {
	/// Creates an [`TableError::InvalidParameter`].
	pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidParameter {
			name: name.into(),
			message: message.into(),
		}
	}
}

/// Result type alias for table operations
pub type Result<T> = std::result::Result<T, TableError>;
