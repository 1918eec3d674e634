//! Date column type implementation

use crate::column::{Column, ColumnOptions};
use crate::value::{Value, is_falsy};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

const DEFAULT_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Column for date values
///
/// Accepts `YYYY-MM-DD` dates, naive date-times and RFC 3339 timestamps, renders
/// them with a fixed `strftime` format and upper-cases the result so month and
/// weekday names render the same regardless of locale casing. Empty values
/// render as an empty string; strings that are not dates pass through.
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::{Column, DateColumn};
/// use serde_json::json;
///
/// let column = DateColumn::new().format("%d %b %Y");
/// assert_eq!(column.render_column(json!("2024-03-05")), json!("05 MAR 2024"));
/// assert_eq!(column.render_column(json!(null)), json!(""));
/// ```
#[derive(Debug, Clone)]
pub struct DateColumn {
	options: ColumnOptions,
	format: String,
}

impl DateColumn {
	/// Creates a new date column using the `%Y-%m-%d` format
	pub fn new() -> Self {
		Self {
			options: ColumnOptions::default(),
			format: DEFAULT_FORMAT.to_string(),
		}
	}

	/// Sets the `strftime` format string
	pub fn format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	fn parse(text: &str) -> Option<NaiveDateTime> {
		if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
			return date.and_hms_opt(0, 0, 0);
		}
		if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
			return Some(dt.naive_local());
		}
		DATETIME_FORMATS
			.iter()
			.find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
	}
}

impl Default for DateColumn {
	fn default() -> Self {
		Self::new()
	}
}

impl Column for DateColumn {
	fn options(&self) -> &ColumnOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut ColumnOptions {
		&mut self.options
	}

	fn render_column(&self, value: Value) -> Value {
		if is_falsy(&value) {
			return Value::String(String::new());
		}
		let Some(parsed) = value.as_str().and_then(Self::parse) else {
			return value;
		};
		// chrono reports unknown specifiers as a formatting error
		let mut out = String::new();
		if write!(out, "{}", parsed.format(&self.format)).is_err() {
			tracing::warn!(format = %self.format, "Invalid date format, value left unformatted");
			return value;
		}
		Value::String(out.to_uppercase())
	}
}
