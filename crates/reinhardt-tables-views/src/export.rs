//! Export downloads
//!
//! An export runs the unpaged pipeline, pairs every rendered row with the
//! column titles and feeds the result to an [`Exporter`], which produces the
//! downloadable file.

use crate::error::Result;
use bytes::Bytes;
use chrono::Local;
use indexmap::IndexMap;
use regex::Regex;
use reinhardt_columns::Value;
use reinhardt_columns::value::display;
use std::sync::LazyLock;

#[cfg(feature = "export")]
mod csv_exporter;

#[cfg(feature = "export")]
pub use csv_exporter::CsvExporter;

/// Query value of `export` that selects an export download.
pub const EXPORT_FORMAT: &str = "excel";

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// A finished export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
	/// Download filename.
	pub filename: String,
	/// MIME type.
	pub content_type: String,
	/// File contents.
	pub bytes: Bytes,
}

/// Writes tabular sheets into a downloadable file.
pub trait Exporter: Send {
	/// File extension, without the dot.
	fn extension(&self) -> &'static str;

	/// Starts `sheet` with a header row.
	fn add_headers(&mut self, sheet: &str, headers: &[String]) -> Result<()>;

	/// Appends a row to `sheet`; values are keyed by header.
	fn add_row(&mut self, sheet: &str, row: &IndexMap<String, Value>) -> Result<()>;

	/// Produces the file.
	fn download(self: Box<Self>, filename: &str) -> Result<ExportFile>;
}

/// Builds `{title}-{YYYY-MM-DD HHMM}.{extension}` from the current local time.
pub fn export_filename(title: &str, extension: &str) -> String {
	format!(
		"{}-{}.{}",
		title,
		Local::now().format("%Y-%m-%d %H%M"),
		extension
	)
}

/// Converts a rendered cell to plain export text.
///
/// Markup is stripped, list items are joined with CRLF and `null` becomes empty.
///
/// # Example
///
/// ```rust
/// use reinhardt_tables_views::export::cell_text;
/// use serde_json::json;
///
/// assert_eq!(cell_text(&json!(r#"<a href="/e/1/">Ann</a>"#)), "Ann");
/// assert_eq!(cell_text(&json!(["a", "b"])), "a\r\nb");
/// assert_eq!(cell_text(&json!(null)), "");
/// ```
pub fn cell_text(value: &Value) -> String {
	match value {
		Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join("\r\n"),
		other => strip_tags(&display(other)),
	}
}

/// Removes HTML tags from `text`.
pub fn strip_tags(text: &str) -> String {
	match TAG.as_ref() {
		Some(tag) => tag.replace_all(text, "").into_owned(),
		None => text.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!("<ul><li>x</li><li>y</li></ul>"), "xy")]
	#[case(json!(42), "42")]
	#[case(json!(["<b>a</b>", null]), "a\r\n")]
	#[case(json!("plain"), "plain")]
	fn test_cell_text(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(cell_text(&value), expected);
	}

	#[rstest]
	fn test_export_filename_shape() {
		let filename = export_filename("Staff", "csv");
		assert!(filename.starts_with("Staff-"));
		assert!(filename.ends_with(".csv"));
		// "Staff-" + "YYYY-MM-DD HHMM" + ".csv"
		assert_eq!(filename.len(), "Staff-".len() + 15 + ".csv".len());
	}
}
