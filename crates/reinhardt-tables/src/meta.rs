//! Per-table configuration
//!
//! [`TableMeta`] is the typed configuration block of a table schema. Every field
//! is optional so that a derived schema can set only what it changes; getters
//! with the same name as the field apply the documented default.

use crate::datasource::DataSource;
use reinhardt_columns::UrlResolver;
use std::fmt;
use std::sync::Arc;

/// Default maximum page length a client may request.
pub const DEFAULT_MAX_DISPLAY_LENGTH: usize = 100;

/// Default page length, used both by the widget and for requests without `length`.
pub const DEFAULT_ROWS_DISPLAYED: usize = 10;

/// Default export sheet title.
pub const DEFAULT_TITLE: &str = "Sheet";

/// Table configuration with inheritance-aware merging.
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::TableMeta;
///
/// let base = TableMeta::new()
///     .with_search_fields(["first_name"])
///     .with_max_display_length(50);
/// let own = TableMeta::new().with_max_display_length(25);
///
/// let merged = own.merge(base);
/// assert_eq!(merged.max_display_length(), 25);
/// assert_eq!(merged.search_fields(), Some(&["first_name".to_string()][..]));
/// assert_eq!(merged.initial_rows_displayed(), 10);
/// ```
#[derive(Clone, Default)]
pub struct TableMeta {
	/// Data source rows are read from.
	pub model: Option<Arc<dyn DataSource>>,
	/// Column keys the client may sort by. Default: none.
	pub order_columns: Option<Vec<String>>,
	/// Upper bound on the requested page length. Default: 100.
	pub max_display_length: Option<usize>,
	/// Additional fields fetched for every row. Default: none.
	pub extra_fields: Option<Vec<String>>,
	/// Whether the search box is enabled. Default: `true`.
	pub searching: Option<bool>,
	/// Field paths searched by the free-text term, optionally with a lookup suffix.
	pub search_fields: Option<Vec<String>>,
	/// Minimum search term length. Default: 0.
	pub search_min_length: Option<usize>,
	/// Initial ordering as column keys, `-key` for descending. Default: none.
	pub initial_order: Option<Vec<String>>,
	/// Initial page length. Default: 10.
	pub initial_rows_displayed: Option<usize>,
	/// Whether paging, sorting and filtering run on the server. Default: `true`.
	pub server_side: Option<bool>,
	/// Whether the table offers an export download. Default: `false`.
	pub export_to_excel: Option<bool>,
	/// Name of a filter form rendered next to the table.
	pub filter_form: Option<String>,
	/// Export sheet title. Default: `"Sheet"`.
	pub title: Option<String>,
	/// Resolver used to reverse column links.
	pub url_resolver: Option<Arc<dyn UrlResolver>>,
}

macro_rules! setter {
	($(#[$doc:meta])* $setter:ident => $name:ident: Vec<String>) => {
		$(#[$doc])*
		pub fn $setter<I, S>(mut self, values: I) -> Self
		where
			I: IntoIterator<Item = S>,
			S: Into<String>,
		{
			self.$name = Some(values.into_iter().map(Into::into).collect());
			self
		}
	};
	($(#[$doc:meta])* $setter:ident => $name:ident: String) => {
		$(#[$doc])*
		pub fn $setter(mut self, value: impl Into<String>) -> Self {
			self.$name = Some(value.into());
			self
		}
	};
	($(#[$doc:meta])* $setter:ident => $name:ident: $ty:ty) => {
		$(#[$doc])*
		pub fn $setter(mut self, value: $ty) -> Self {
			self.$name = Some(value);
			self
		}
	};
}

impl TableMeta {
	/// Creates a configuration with every field unset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the data source.
	pub fn with_model(mut self, model: impl DataSource + 'static) -> Self {
		self.model = Some(Arc::new(model));
		self
	}

	/// Sets the URL resolver used by linked columns.
	pub fn with_url_resolver(mut self, resolver: impl UrlResolver + 'static) -> Self {
		self.url_resolver = Some(Arc::new(resolver));
		self
	}

	setter! {
		/// Sets the sortable column keys.
		with_order_columns => order_columns: Vec<String>
	}
	setter! {
		/// Sets the maximum page length.
		with_max_display_length => max_display_length: usize
	}
	setter! {
		/// Sets fields fetched in addition to the column fields.
		with_extra_fields => extra_fields: Vec<String>
	}
	setter! {
		/// Enables or disables search.
		with_searching => searching: bool
	}
	setter! {
		/// Sets the searched field paths.
		with_search_fields => search_fields: Vec<String>
	}
	setter! {
		/// Sets the minimum search term length.
		with_search_min_length => search_min_length: usize
	}
	setter! {
		/// Sets the initial ordering.
		with_initial_order => initial_order: Vec<String>
	}
	setter! {
		/// Sets the initial page length.
		with_initial_rows_displayed => initial_rows_displayed: usize
	}
	setter! {
		/// Enables or disables server-side processing.
		with_server_side => server_side: bool
	}
	setter! {
		/// Enables or disables export.
		with_export_to_excel => export_to_excel: bool
	}
	setter! {
		/// Names the filter form.
		with_filter_form => filter_form: String
	}
	setter! {
		/// Sets the export sheet title.
		with_title => title: String
	}

	/// Merges `inherited` under `self`: every field set here wins.
	pub fn merge(self, inherited: TableMeta) -> TableMeta {
		TableMeta {
			model: self.model.or(inherited.model),
			order_columns: self.order_columns.or(inherited.order_columns),
			max_display_length: self.max_display_length.or(inherited.max_display_length),
			extra_fields: self.extra_fields.or(inherited.extra_fields),
			searching: self.searching.or(inherited.searching),
			search_fields: self.search_fields.or(inherited.search_fields),
			search_min_length: self.search_min_length.or(inherited.search_min_length),
			initial_order: self.initial_order.or(inherited.initial_order),
			initial_rows_displayed: self
				.initial_rows_displayed
				.or(inherited.initial_rows_displayed),
			server_side: self.server_side.or(inherited.server_side),
			export_to_excel: self.export_to_excel.or(inherited.export_to_excel),
			filter_form: self.filter_form.or(inherited.filter_form),
			title: self.title.or(inherited.title),
			url_resolver: self.url_resolver.or(inherited.url_resolver),
		}
	}

	/// Returns the data source, if configured.
	pub fn model(&self) -> Option<&Arc<dyn DataSource>> {
		self.model.as_ref()
	}

	/// Returns the sortable column keys.
	pub fn order_columns(&self) -> &[String] {
		self.order_columns.as_deref().unwrap_or_default()
	}

	/// Returns the maximum page length.
	pub fn max_display_length(&self) -> usize {
		self.max_display_length.unwrap_or(DEFAULT_MAX_DISPLAY_LENGTH)
	}

	/// Returns the extra fields fetched for every row.
	pub fn extra_fields(&self) -> &[String] {
		self.extra_fields.as_deref().unwrap_or_default()
	}

	/// Returns whether search is enabled.
	pub fn searching(&self) -> bool {
		self.searching.unwrap_or(true)
	}

	/// Returns the searched field paths, if any were declared.
	pub fn search_fields(&self) -> Option<&[String]> {
		self.search_fields.as_deref()
	}

	/// Returns the minimum search term length.
	pub fn search_min_length(&self) -> usize {
		self.search_min_length.unwrap_or(0)
	}

	/// Returns the initial ordering.
	pub fn initial_order(&self) -> &[String] {
		self.initial_order.as_deref().unwrap_or_default()
	}

	/// Returns the initial page length.
	pub fn initial_rows_displayed(&self) -> usize {
		self.initial_rows_displayed.unwrap_or(DEFAULT_ROWS_DISPLAYED)
	}

	/// Returns whether processing runs on the server.
	pub fn server_side(&self) -> bool {
		self.server_side.unwrap_or(true)
	}

	/// Returns whether export is offered.
	pub fn export_to_excel(&self) -> bool {
		self.export_to_excel.unwrap_or(false)
	}

	/// Returns the export sheet title.
	pub fn title(&self) -> &str {
		self.title.as_deref().unwrap_or(DEFAULT_TITLE)
	}

	/// Returns the filter form name.
	pub fn filter_form(&self) -> Option<&str> {
		self.filter_form.as_deref()
	}

	/// Returns the link resolver, if configured.
	pub fn url_resolver(&self) -> Option<&Arc<dyn UrlResolver>> {
		self.url_resolver.as_ref()
	}
}

impl fmt::Debug for TableMeta {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableMeta")
			.field("model", &self.model.as_ref().map(|_| "<data source>"))
			.field("order_columns", &self.order_columns)
			.field("max_display_length", &self.max_display_length)
			.field("extra_fields", &self.extra_fields)
			.field("searching", &self.searching)
			.field("search_fields", &self.search_fields)
			.field("search_min_length", &self.search_min_length)
			.field("initial_order", &self.initial_order)
			.field("initial_rows_displayed", &self.initial_rows_displayed)
			.field("server_side", &self.server_side)
			.field("export_to_excel", &self.export_to_excel)
			.field("filter_form", &self.filter_form)
			.field("title", &self.title)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::datasource::MemoryDataSource;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let meta = TableMeta::new();
		assert!(meta.model().is_none());
		assert!(meta.order_columns().is_empty());
		assert_eq!(meta.max_display_length(), 100);
		assert!(meta.searching());
		assert_eq!(meta.search_fields(), None);
		assert_eq!(meta.search_min_length(), 0);
		assert_eq!(meta.initial_rows_displayed(), 10);
		assert!(meta.server_side());
		assert!(!meta.export_to_excel());
		assert_eq!(meta.title(), "Sheet");
	}

	#[rstest]
	fn test_own_values_win() {
		let own = TableMeta::new().with_title("Staff").with_searching(false);
		let inherited = TableMeta::new()
			.with_title("People")
			.with_search_min_length(3)
			.with_model(MemoryDataSource::default());

		let merged = own.merge(inherited);

		assert_eq!(merged.title(), "Staff");
		assert!(!merged.searching());
		assert_eq!(merged.search_min_length(), 3);
		assert!(merged.model().is_some());
	}

	#[rstest]
	fn test_debug_hides_trait_objects() {
		let meta = TableMeta::new().with_model(MemoryDataSource::default());
		let debug = format!("{:?}", meta);
		assert!(debug.contains("<data source>"));
		assert!(debug.ends_with(".. }"));
	}
}
