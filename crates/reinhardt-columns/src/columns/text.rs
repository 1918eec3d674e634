//! Plain text column

use crate::column::{Column, ColumnOptions};

/// Column that renders the raw value unchanged
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::{Column, ColumnExt, TextColumn};
/// use serde_json::json;
///
/// let column = TextColumn::new().title("First name");
/// assert_eq!(column.render_column(json!("Alice")), json!("Alice"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextColumn {
	options: ColumnOptions,
}

impl TextColumn {
	/// Creates a new text column
	pub fn new() -> Self {
		Self::default()
	}
}

impl Column for TextColumn {
	fn options(&self) -> &ColumnOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut ColumnOptions {
		&mut self.options
	}
}
