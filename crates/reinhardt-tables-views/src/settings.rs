//! Deployment settings for table views

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Message returned to clients when a request fails outside debug mode.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred while processing an AJAX request.";

/// How much of a failure table views reveal to the client.
///
/// # Example
///
/// ```rust
/// use reinhardt_tables_views::ViewSettings;
///
/// let settings = ViewSettings::from_toml_str("debug = true").unwrap();
/// assert!(settings.debug);
/// assert_eq!(
///     settings.error_message,
///     "An error occurred while processing an AJAX request."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
	/// Include the full error chain in error payloads.
	pub debug: bool,
	/// Message sent instead when `debug` is off.
	pub error_message: String,
}

impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			debug: false,
			error_message: DEFAULT_ERROR_MESSAGE.to_string(),
		}
	}
}

impl ViewSettings {
	/// Settings with `debug` turned on.
	pub fn debug() -> Self {
		Self {
			debug: true,
			..Self::default()
		}
	}

	/// Parses settings from a TOML document; missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_document_uses_defaults() {
		assert_eq!(ViewSettings::from_toml_str("").unwrap(), ViewSettings::default());
	}

	#[rstest]
	fn test_custom_message() {
		let settings = ViewSettings::from_toml_str(r#"error_message = "Try again later""#).unwrap();
		assert!(!settings.debug);
		assert_eq!(settings.error_message, "Try again later");
	}

	#[rstest]
	fn test_invalid_document() {
		assert!(ViewSettings::from_toml_str("debug = \"maybe\"").is_err());
	}
}
