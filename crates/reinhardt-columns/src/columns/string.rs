//! Computed string column

use crate::column::{Column, ColumnOptions};

/// Column with no data-source field of its own
///
/// Renders nothing by itself; pair it with a render hook registered under the
/// same key to compute the cell from the whole row.
#[derive(Debug, Clone, Default)]
pub struct StringColumn {
	options: ColumnOptions,
}

impl StringColumn {
	/// Creates a new string column
	pub fn new() -> Self {
		Self::default()
	}
}

impl Column for StringColumn {
	fn options(&self) -> &ColumnOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut ColumnOptions {
		&mut self.options
	}

	fn is_data_independent(&self) -> bool {
		true
	}
}
