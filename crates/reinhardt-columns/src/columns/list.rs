//! Bulleted list column

use crate::column::{Column, ColumnOptions};
use crate::value::{Value, display};

/// Column rendering a sequence of values as an unordered list
///
/// A scalar renders as a single item and `null` as an empty cell.
#[derive(Debug, Clone, Default)]
pub struct BulletedListColumn {
	options: ColumnOptions,
}

impl BulletedListColumn {
	/// Creates a new bulleted list column
	pub fn new() -> Self {
		Self::default()
	}
}

impl Column for BulletedListColumn {
	fn options(&self) -> &ColumnOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut ColumnOptions {
		&mut self.options
	}

	fn render_column(&self, value: Value) -> Value {
		let items: String = match &value {
			Value::Null => return Value::String(String::new()),
			Value::Array(items) => items
				.iter()
				.map(|item| format!("<li>{}</li>", display(item)))
				.collect(),
			other => format!("<li>{}</li>", display(other)),
		};
		Value::String(format!(
			r#"<ul style="margin: 0; padding-left: 1.5em;">{}</ul>"#,
			items
		))
	}
}
