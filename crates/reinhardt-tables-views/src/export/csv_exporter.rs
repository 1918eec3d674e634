//! CSV exporter

use super::{ExportFile, Exporter, cell_text};
use crate::error::{Result, ViewError};
use bytes::Bytes;
use indexmap::IndexMap;
use reinhardt_columns::Value;

#[derive(Debug, Default)]
struct Sheet {
	headers: Vec<String>,
	rows: Vec<Vec<String>>,
}

/// Exports every sheet into one CSV file.
///
/// Sheets are written one after another in the order they were started, each
/// with its own header row.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use reinhardt_tables_views::export::{CsvExporter, Exporter};
/// use serde_json::json;
///
/// let mut exporter = CsvExporter::new();
/// exporter.add_headers("Staff", &["Name".to_string()]).unwrap();
/// let mut row = IndexMap::new();
/// row.insert("Name".to_string(), json!("<b>Ann</b>"));
/// exporter.add_row("Staff", &row).unwrap();
///
/// let file = Box::new(exporter).download("staff.csv").unwrap();
/// assert_eq!(&file.bytes[..], b"Name\nAnn\n");
/// ```
#[derive(Debug, Default)]
pub struct CsvExporter {
	sheets: IndexMap<String, Sheet>,
}

impl CsvExporter {
	/// Creates an exporter with no sheets.
	pub fn new() -> Self {
		Self::default()
	}
}

impl Exporter for CsvExporter {
	fn extension(&self) -> &'static str {
		"csv"
	}

	fn add_headers(&mut self, sheet: &str, headers: &[String]) -> Result<()> {
		self.sheets.entry(sheet.to_string()).or_default().headers = headers.to_vec();
		Ok(())
	}

	fn add_row(&mut self, sheet: &str, row: &IndexMap<String, Value>) -> Result<()> {
		let sheet = self
			.sheets
			.get_mut(sheet)
			.ok_or_else(|| ViewError::Export(format!("sheet '{}' has no headers", sheet)))?;
		let cells = sheet
			.headers
			.iter()
			.map(|header| row.get(header).map(cell_text).unwrap_or_default())
			.collect();
		sheet.rows.push(cells);
		Ok(())
	}

	fn download(self: Box<Self>, filename: &str) -> Result<ExportFile> {
		let mut writer = csv::WriterBuilder::new()
			.flexible(true)
			.from_writer(Vec::new());
		for sheet in self.sheets.values() {
			writer
				.write_record(&sheet.headers)
				.map_err(|e| ViewError::Export(e.to_string()))?;
			for row in &sheet.rows {
				writer
					.write_record(row)
					.map_err(|e| ViewError::Export(e.to_string()))?;
			}
		}
		let bytes = writer
			.into_inner()
			.map_err(|e| ViewError::Export(e.to_string()))?;
		Ok(ExportFile {
			filename: filename.to_string(),
			content_type: "text/csv; charset=utf-8".to_string(),
			bytes: Bytes::from(bytes),
		})
	}
}
