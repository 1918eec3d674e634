//! Per-request query and render pipeline

use crate::datasource::{Dataset, Lookup, LookupKind, OrderSpec, Predicate};
use crate::error::{Result, TableError};
use crate::params::{RequestParams, SortDirection};
use crate::payload::PipelinePayload;
use crate::request::DatatableRequest;
use crate::schema::{BoundColumn, CellHook, HookInput};
use crate::table::Datatable;
use reinhardt_columns::{Row, Value};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// One execution of a table against one request
///
/// A pipeline borrows the shared table definition and owns everything that
/// belongs to the request: the parsed parameters and the intermediate datasets.
///
/// ```mermaid
/// graph LR
///     A[parameters] --> B[initial dataset]
///     B -->|count: recordsTotal| C[search filter]
///     C --> D[custom filters]
///     D -->|count: recordsFiltered| E[ordering]
///     E --> F[paging]
///     F --> G[projection]
///     G --> H[render]
///     H --> I[link wrap]
///     I --> J[payload]
/// ```
///
/// Each cell is rendered by `render_column`, then `render_column_using_row`,
/// then the table's render hook, then `render_link`.
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::{ColumnExt, TextColumn};
/// use reinhardt_tables::datasource::MemoryDataSource;
/// use reinhardt_tables::{Datatable, DatatableRequest, TableMeta, TableSchema};
/// use serde_json::json;
///
/// let schema = TableSchema::builder("People")
///     .column("name", TextColumn::new().source_field("first"))
///     .meta(TableMeta::new().with_model(MemoryDataSource::from_values(vec![
///         json!({"first": "B"}),
///         json!({"first": "A"}),
///     ])))
///     .build();
///
/// let request = DatatableRequest::get("/?draw=1&order[0][column]=0&order[0][dir]=asc");
/// let payload = schema.pipeline(&request).unwrap().get_context_data().unwrap();
///
/// assert_eq!(payload.records_total, 2);
/// assert_eq!(payload.data, vec![vec![json!("A")], vec![json!("B")]]);
/// ```
pub struct Pipeline<'a, T: ?Sized> {
	table: &'a T,
	request: &'a DatatableRequest,
	params: RequestParams,
}

impl<'a, T: Datatable + ?Sized> Pipeline<'a, T> {
	/// Parses the request parameters for `table`.
	pub fn new(table: &'a T, request: &'a DatatableRequest) -> Result<Self> {
		let default_length = table.schema().meta().initial_rows_displayed();
		let params = RequestParams::from_request(request, default_length)?;
		Ok(Self {
			table,
			request,
			params,
		})
	}

	/// Returns the parsed parameters.
	pub fn params(&self) -> &RequestParams {
		&self.params
	}

	/// Returns the request being served.
	pub fn request(&self) -> &DatatableRequest {
		self.request
	}

	/// Runs the paged pipeline.
	pub fn get_context_data(&self) -> Result<PipelinePayload> {
		let table = self.table.schema().name();
		let dataset = self.table.initial_dataset(self.request)?;
		let records_total = dataset.count()?;

		let dataset = self.filter_queryset(dataset)?;
		let records_filtered = dataset.count()?;
		tracing::debug!(table, records_total, records_filtered, "Counted table records");

		let dataset = self.ordering(dataset)?;
		let dataset = self.paging(dataset)?;
		let data = self.prepare_results(dataset.as_ref())?;

		Ok(PipelinePayload {
			draw: self.params.draw,
			records_total,
			records_filtered,
			data,
		})
	}

	/// Runs the pipeline without paging or counts, for export.
	pub fn get_data(&self) -> Result<Vec<Vec<Value>>> {
		let dataset = self.table.initial_dataset(self.request)?;
		let dataset = self.filter_queryset(dataset)?;
		let dataset = self.ordering(dataset)?;
		self.prepare_results(dataset.as_ref())
	}

	/// Applies the search term, then the table's own filters.
	pub fn filter_queryset(&self, dataset: Box<dyn Dataset>) -> Result<Box<dyn Dataset>> {
		let dataset = self.filter_by_search(dataset)?;
		self.table.filter_by_filters(dataset, &self.params)
	}

	/// Filters by the search term across the configured search fields.
	///
	/// Fields without a lookup suffix match case-insensitive substrings; the
	/// per-field conditions are OR'd. Skipped when search is disabled, no
	/// search fields are configured, or the term is shorter than the minimum.
	pub fn filter_by_search(&self, dataset: Box<dyn Dataset>) -> Result<Box<dyn Dataset>> {
		let meta = self.table.schema().meta();
		let Some(term) = self.params.search.as_deref() else {
			return Ok(dataset);
		};
		if !meta.searching() || term.chars().count() < meta.search_min_length() {
			return Ok(dataset);
		}
		let fields = match meta.search_fields() {
			Some(fields) if !fields.is_empty() => fields,
			_ => return Ok(dataset),
		};
		let predicate = Predicate::Or(
			fields
				.iter()
				.map(|path| {
					Predicate::Lookup(Lookup::from_path(
						path,
						Value::String(term.to_string()),
						LookupKind::IContains,
					))
				})
				.collect(),
		);
		tracing::debug!(term, fields = fields.len(), "Applying search filter");
		Ok(dataset.filter(&predicate)?)
	}

	/// Orders by the requested sort descriptors.
	pub fn ordering(&self, dataset: Box<dyn Dataset>) -> Result<Box<dyn Dataset>> {
		if self.params.order.is_empty() {
			return Ok(dataset);
		}
		let schema = self.table.schema();
		let specs = self
			.params
			.order
			.iter()
			.enumerate()
			.map(|(i, descriptor)| -> Result<OrderSpec> {
				let field = schema.field_by_index(descriptor.column).ok_or_else(|| {
					TableError::invalid_parameter(
						format!("order[{}][column]", i),
						format!("no column at index {}", descriptor.column),
					)
				})?;
				Ok(OrderSpec {
					field: field.to_string(),
					descending: descriptor.direction == SortDirection::Desc,
				})
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(dataset.order_by(&specs)?)
	}

	/// Slices the requested page.
	///
	/// A length of `-1` keeps every row; any other length is capped at
	/// `max_display_length`.
	pub fn paging(&self, dataset: Box<dyn Dataset>) -> Result<Box<dyn Dataset>> {
		let Some(length) = self.params.length else {
			return Ok(dataset);
		};
		let limit = length.min(self.table.schema().meta().max_display_length());
		let start = self.params.start;
		tracing::debug!(start, limit, "Slicing page");
		Ok(dataset.slice(start, Some(start.saturating_add(limit)))?)
	}

	/// Fetches the projected fields and renders every row.
	pub fn prepare_results(&self, dataset: &dyn Dataset) -> Result<Vec<Vec<Value>>> {
		let fields = self.table.schema().projection();
		tracing::debug!(fields = ?fields, "Fetching projected fields");
		let rows = dataset.values(&fields)?;
		self.render_columns(&rows)
	}

	/// Renders `rows` cell by cell in column order.
	pub fn render_columns(&self, rows: &[Row]) -> Result<Vec<Vec<Value>>> {
		let columns: Vec<(&BoundColumn, Option<CellHook>)> = self
			.table
			.schema()
			.columns()
			.map(|bound| (bound, self.table.render_hook(bound)))
			.collect();
		let resolver = self.table.url_resolver();

		rows.iter()
			.map(|row| {
				columns
					.iter()
					.map(|(bound, hook)| -> Result<Value> {
						let column = bound.column();
						let independent = column.is_data_independent();
						let raw = if independent {
							Value::Null
						} else {
							row.get(bound.field()).cloned().unwrap_or(Value::Null)
						};

						let mut value = column.render_column(raw);
						value = column.render_column_using_row(value, row)?;
						if let Some(hook) = hook {
							value = if independent {
								hook(HookInput::Row(row))?
							} else {
								hook(HookInput::Value(&value))?
							};
						}
						if column.has_link() {
							value = column.render_link(value, row, resolver.as_ref())?;
						}
						Ok(value)
					})
					.collect::<Result<Vec<_>>>()
			})
			.collect()
	}
}
