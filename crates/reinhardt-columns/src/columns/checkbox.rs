//! Checkbox column type implementation

use crate::column::{Column, ColumnOptions, option_attribute};
use crate::error::{ColumnError, Result};
use crate::value::{Row, Value, display};

/// Column rendering a checkbox input per row
///
/// The input's `value` attribute is read from the row field given to
/// [`CheckBoxColumn::new`], which is fetched even though the column itself is
/// data-independent.
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::{CheckBoxColumn, Column};
/// use serde_json::{Map, json};
///
/// let column = CheckBoxColumn::new("id").name("selected");
/// let mut row = Map::new();
/// row.insert("id".to_string(), json!(3));
///
/// let cell = column.render_column_using_row(json!(null), &row).unwrap();
/// assert_eq!(cell, json!(r#"<input type="checkbox" name="selected" value="3">"#));
/// ```
#[derive(Debug, Clone)]
pub struct CheckBoxColumn {
	options: ColumnOptions,
	name: Option<String>,
}

impl CheckBoxColumn {
	/// Creates a checkbox column whose value comes from `value_field`
	pub fn new(value_field: impl Into<String>) -> Self {
		Self {
			options: ColumnOptions {
				source_field: Some(value_field.into()),
				..ColumnOptions::default()
			},
			name: None,
		}
	}

	/// Sets the `name` attribute of the input
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	fn value_field(&self) -> Option<&str> {
		self.options.source_field.as_deref()
	}
}

impl Column for CheckBoxColumn {
	fn options(&self) -> &ColumnOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut ColumnOptions {
		&mut self.options
	}

	fn render_column_using_row(&self, _value: Value, row: &Row) -> Result<Value> {
		let name = self
			.name
			.as_deref()
			.map(|name| format!(r#" name="{}""#, name))
			.unwrap_or_default();
		let value = match self.value_field() {
			Some(field) => {
				let value = row.get(field).ok_or_else(|| ColumnError::MissingField {
					field: field.to_string(),
				})?;
				format!(r#" value="{}""#, display(value))
			}
			None => String::new(),
		};
		Ok(Value::String(format!(
			r#"<input type="checkbox"{}{}>"#,
			name, value
		)))
	}

	fn is_data_independent(&self) -> bool {
		true
	}

	fn referenced_values(&self) -> Vec<String> {
		let mut fields: Vec<String> = self.value_field().map(str::to_string).into_iter().collect();
		if self.has_link() {
			fields.extend(
				self.options
					.link_args
					.iter()
					.filter_map(|arg| arg.field())
					.map(str::to_string),
			);
		}
		fields
	}

	fn attribute(&self, name: &str) -> Option<Value> {
		match name {
			"name" => self.name.clone().map(Value::String),
			_ => option_attribute(&self.options, name),
		}
	}
}
