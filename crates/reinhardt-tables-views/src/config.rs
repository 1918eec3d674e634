//! One-time widget configuration and template context

use crate::error::Result;
use reinhardt_tables::datasource::OrderSpec;
use reinhardt_tables::{SortDirection, TableError, TableSchema};
use serde::{Deserialize, Serialize};

/// Per-column widget options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
	/// CSS class of the column's cells.
	#[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
	/// `Some(false)` when the column may not be sorted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub orderable: Option<bool>,
}

/// Options the client grid is initialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
	/// Column options in display order.
	pub columns: Vec<ColumnConfig>,
	/// Initial sort as `[index, direction]` pairs.
	pub order: Vec<(usize, SortDirection)>,
	/// Initial page length.
	#[serde(rename = "iDisplayLength")]
	pub display_length: usize,
	/// Whether the search box is shown.
	pub searching: bool,
	/// Whether data requests go to the server.
	#[serde(rename = "serverSide")]
	pub server_side: bool,
	/// Whether the widget shows a processing indicator.
	pub processing: bool,
	/// Whether paging is enabled.
	pub paging: bool,
	/// Whether sorting is enabled.
	pub ordering: bool,
}

/// Builds the widget configuration of `schema`.
///
/// Columns not listed in `order_columns` are marked `orderable: false`, and
/// `initial_order` keys are translated to column positions.
///
/// # Errors
///
/// Fails with [`TableError::ImproperlyConfigured`] when `initial_order` names a
/// key that is not a column.
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::{ColumnExt, TextColumn};
/// use reinhardt_tables::{SortDirection, TableMeta, TableSchema};
/// use reinhardt_tables_views::datatable_config;
///
/// let schema = TableSchema::builder("T")
///     .column("name", TextColumn::new().css_class("text-bold"))
///     .column("joined", TextColumn::new())
///     .meta(
///         TableMeta::new()
///             .with_order_columns(["joined"])
///             .with_initial_order(["-joined"]),
///     )
///     .build();
///
/// let config = datatable_config(&schema).unwrap();
/// assert_eq!(config.columns[0].class_name.as_deref(), Some("text-bold"));
/// assert_eq!(config.columns[0].orderable, Some(false));
/// assert_eq!(config.columns[1].orderable, None);
/// assert_eq!(config.order, vec![(1, SortDirection::Desc)]);
/// ```
pub fn datatable_config(schema: &TableSchema) -> std::result::Result<WidgetConfig, TableError> {
	let meta = schema.meta();
	let columns = schema
		.columns()
		.map(|bound| ColumnConfig {
			class_name: bound.column().options().css_class.clone(),
			orderable: (!meta.order_columns().iter().any(|key| key == bound.key())).then_some(false),
		})
		.collect();

	let order = meta
		.initial_order()
		.iter()
		.map(|spec| -> std::result::Result<(usize, SortDirection), TableError> {
			let spec = OrderSpec::parse(spec);
			let index = schema.index_by_key(&spec.field).ok_or_else(|| {
				TableError::ImproperlyConfigured(format!(
					"initial_order of {} names unknown column '{}'",
					schema.name(),
					spec.field
				))
			})?;
			let direction = if spec.descending {
				SortDirection::Desc
			} else {
				SortDirection::Asc
			};
			Ok((index, direction))
		})
		.collect::<std::result::Result<Vec<_>, TableError>>()?;

	let server_side = meta.server_side();
	Ok(WidgetConfig {
		columns,
		order,
		display_length: meta.initial_rows_displayed(),
		searching: meta.searching(),
		server_side,
		processing: server_side,
		paging: true,
		ordering: true,
	})
}

/// What a template needs to draw the table shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContext {
	/// Table name, used to address the data endpoint.
	pub name: String,
	/// Column header texts in display order.
	pub titles: Vec<String>,
	/// Whether an export link is shown.
	pub can_export: bool,
	/// Filter form rendered next to the table, if any.
	pub filter_form: Option<String>,
	/// Serialized [`WidgetConfig`].
	pub config: String,
}

/// Builds the template context of `schema`.
pub fn render_context(schema: &TableSchema) -> Result<TableContext> {
	let config = serde_json::to_string(&datatable_config(schema)?)?;
	let meta = schema.meta();
	Ok(TableContext {
		name: schema.name().to_string(),
		titles: schema.column_titles(),
		can_export: meta.export_to_excel(),
		filter_form: meta.filter_form().map(str::to_string),
		config,
	})
}
