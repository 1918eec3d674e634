//! Base column trait and shared column options

use crate::error::Result;
use crate::link::{LinkArg, UrlResolver, anchor};
use crate::value::{Row, Value, humanize};
use std::fmt::Debug;

/// Options shared by every column type.
///
/// All fields are optional; a column with default options renders the raw value
/// of the field named by its declaration key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOptions {
	/// Header text. Defaults to the humanized declaration key.
	pub title: Option<String>,
	/// CSS class handed to the client widget.
	pub css_class: Option<String>,
	/// Data-source field supplying the raw value, instead of the declaration key.
	pub source_field: Option<String>,
	/// Route name; when set the rendered cell is wrapped in a link.
	pub link: Option<String>,
	/// Arguments used to reverse [`ColumnOptions::link`].
	pub link_args: Vec<LinkArg>,
}

/// Trait for table column definitions
///
/// A column describes how one cell of every row is sourced and rendered. The
/// table engine drives a fixed sequence for each cell:
///
/// 1. [`Column::render_column`] on the raw value (`null` for data-independent columns)
/// 2. [`Column::render_column_using_row`] with the whole row
/// 3. the table's render hook for the column, if any
/// 4. [`Column::render_link`] when [`Column::has_link`] is true
///
/// Only [`Column::options`] and [`Column::options_mut`] are required; every
/// rendering step defaults to passing the value through.
pub trait Column: Debug + Send + Sync {
	/// Returns the shared options of this column.
	fn options(&self) -> &ColumnOptions;

	/// Returns the shared options of this column for modification.
	fn options_mut(&mut self) -> &mut ColumnOptions;

	/// Renders a single raw value.
	fn render_column(&self, value: Value) -> Value {
		value
	}

	/// Second rendering stage with access to every fetched field of the row.
	fn render_column_using_row(&self, value: Value, _row: &Row) -> Result<Value> {
		Ok(value)
	}

	/// Returns `true` when the column is not backed by a single data-source field.
	///
	/// Data-independent columns are left out of the projected field list and
	/// their render hook receives the whole row.
	fn is_data_independent(&self) -> bool {
		false
	}

	/// Returns extra fields this column needs fetched for every row.
	///
	/// By default these are the row-field link arguments.
	fn referenced_values(&self) -> Vec<String> {
		if !self.has_link() {
			return Vec::new();
		}
		self.options()
			.link_args
			.iter()
			.filter_map(LinkArg::field)
			.map(str::to_string)
			.collect()
	}

	/// Looks up an attribute by name for `.attribute` link arguments.
	///
	/// Implementations with extra state (an icon name, a constant text) extend
	/// this and fall back to [`option_attribute`].
	fn attribute(&self, name: &str) -> Option<Value> {
		option_attribute(self.options(), name)
	}

	/// Returns `true` when the column links to a route.
	fn has_link(&self) -> bool {
		self.options().link.is_some()
	}

	/// Wraps `value` in an anchor built from the link route and arguments.
	///
	/// Fails when a row-field argument is absent from `row` or the route cannot
	/// be reversed. Columns without a link return `value` unchanged.
	fn render_link(&self, value: Value, row: &Row, resolver: &dyn UrlResolver) -> Result<Value> {
		let Some(route) = self.options().link.as_deref() else {
			return Ok(value);
		};
		let args = self
			.options()
			.link_args
			.iter()
			.map(|arg| arg.resolve(row, |name| self.attribute(name)))
			.collect::<Result<Vec<_>>>()?;
		let url = resolver.reverse(route, &args)?;
		Ok(Value::String(anchor(&url, &value)))
	}

	/// Returns the data-source field this column reads when declared as `key`.
	fn effective_field<'a>(&'a self, key: &'a str) -> &'a str {
		self.options().source_field.as_deref().unwrap_or(key)
	}

	/// Returns the header text for this column when declared as `key`.
	fn title_for(&self, key: &str) -> String {
		self.options()
			.title
			.clone()
			.unwrap_or_else(|| humanize(key))
	}
}

/// Resolves the attributes every column shares.
pub fn option_attribute(options: &ColumnOptions, name: &str) -> Option<Value> {
	let value = match name {
		"title" => options.title.clone(),
		"css_class" => options.css_class.clone(),
		"source_field" | "value" => options.source_field.clone(),
		"link" => options.link.clone(),
		_ => None,
	};
	value.map(Value::String)
}

/// Builder methods available on every column.
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::{ColumnExt, TextColumn};
///
/// let column = TextColumn::new()
///     .title("Manager")
///     .source_field("manager__last_name")
///     .link("employee_detail", ["manager_id"]);
/// ```
pub trait ColumnExt: Column + Sized {
	/// Sets the header text.
	fn title(mut self, title: impl Into<String>) -> Self {
		self.options_mut().title = Some(title.into());
		self
	}

	/// Sets the CSS class passed to the client widget.
	fn css_class(mut self, css_class: impl Into<String>) -> Self {
		self.options_mut().css_class = Some(css_class.into());
		self
	}

	/// Reads the raw value from `field` instead of the declaration key.
	fn source_field(mut self, field: impl Into<String>) -> Self {
		self.options_mut().source_field = Some(field.into());
		self
	}

	/// Links the rendered cell to `route`, reversed with `args`.
	fn link<I, A>(mut self, route: impl Into<String>, args: I) -> Self
	where
		I: IntoIterator<Item = A>,
		A: Into<LinkArg>,
	{
		let options = self.options_mut();
		options.link = Some(route.into());
		options.link_args = args.into_iter().map(Into::into).collect();
		self
	}
}

impl<C: Column> ColumnExt for C {}
