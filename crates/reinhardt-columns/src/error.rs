//! Error types raised while rendering a column cell.

use thiserror::Error;

/// Errors that can occur while rendering a cell or wrapping it in a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
	/// A row-field lookup referenced a field that was not fetched for the row.
	#[error("Field '{field}' is not present in the row")]
	MissingField {
		/// Name of the missing field.
		field: String,
	},

	/// A `.attribute` link argument named an attribute the column does not have.
	#[error("Column has no attribute '{0}'")]
	UnknownAttribute(String),

	/// No route is registered under the requested name.
	#[error("Reverse for '{0}' not found")]
	NoReverseMatch(String),

	/// A route was found but the arguments do not fit its pattern.
	#[error("Invalid arguments for route '{route}': {message}")]
	InvalidRouteArgument {
		/// Route being reversed.
		route: String,
		/// What went wrong.
		message: String,
	},
}

/// Result type alias for column rendering.
pub type Result<T> = std::result::Result<T, ColumnError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_missing_field_message() {
		let error = ColumnError::MissingField {
			field: "id".to_string(),
		};
		assert_eq!(error.to_string(), "Field 'id' is not present in the row");
	}

	#[rstest]
	fn test_no_reverse_match_message() {
		let error = ColumnError::NoReverseMatch("employee_detail".to_string());
		assert_eq!(error.to_string(), "Reverse for 'employee_detail' not found");
	}
}
