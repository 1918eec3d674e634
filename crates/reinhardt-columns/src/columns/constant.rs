//! Constant text column

use crate::column::{Column, ColumnOptions, option_attribute};
use crate::value::Value;

/// Column that always renders the same text, whatever the row holds
#[derive(Debug, Clone)]
pub struct ConstantTextColumn {
	options: ColumnOptions,
	text: String,
}

impl ConstantTextColumn {
	/// Creates a column rendering `text` in every row
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			options: ColumnOptions::default(),
			text: text.into(),
		}
	}

	/// Returns the constant text
	pub fn text(&self) -> &str {
		&self.text
	}
}

impl Column for ConstantTextColumn {
	fn options(&self) -> &ColumnOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut ColumnOptions {
		&mut self.options
	}

	fn render_column(&self, _value: Value) -> Value {
		Value::String(self.text.clone())
	}

	fn is_data_independent(&self) -> bool {
		true
	}

	fn attribute(&self, name: &str) -> Option<Value> {
		match name {
			"text" => Some(Value::String(self.text.clone())),
			_ => option_attribute(&self.options, name),
		}
	}
}
