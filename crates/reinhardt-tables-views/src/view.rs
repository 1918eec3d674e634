//! Table endpoints
//!
//! [`DatatableView`] answers data requests for one table. Every request gets a
//! `200` JSON envelope: pipeline failures are logged and reported through the
//! envelope's `error` field rather than the HTTP status, so grid widgets can
//! show them inline. Requests carrying `export=excel` get a file download
//! instead.

use crate::error::{Result, ViewError};
use crate::export::{EXPORT_FORMAT, ExportFile, Exporter, export_filename};
use crate::response::{
	DatatableResponse, add_never_cache_headers, error_chain, error_text, json_response,
};
use crate::settings::ViewSettings;
use bytes::Bytes;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};
use indexmap::IndexMap;
use reinhardt_tables::{Datatable, DatatableRequest, Pipeline, QueryDict, draw_token};
use std::fmt;
use std::sync::Arc;

/// Creates a fresh exporter for each download.
pub type ExporterFactory = Arc<dyn Fn() -> Box<dyn Exporter> + Send + Sync>;

/// JSON and export endpoint of one table.
///
/// # Example
///
/// ```rust
/// use reinhardt_columns::TextColumn;
/// use reinhardt_tables::datasource::MemoryDataSource;
/// use reinhardt_tables::{DatatableRequest, TableMeta, TableSchema};
/// use reinhardt_tables_views::DatatableView;
/// use serde_json::json;
///
/// let source = MemoryDataSource::from_values(vec![json!({"name": "Ann"})]);
/// let schema = TableSchema::builder("People")
///     .column("name", TextColumn::new())
///     .meta(TableMeta::new().with_model(source))
///     .build();
///
/// let view = DatatableView::new(schema);
/// let response = view.as_json(&DatatableRequest::get("/people/?draw=1"));
///
/// let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
/// assert_eq!(body["data"], json!([["Ann"]]));
/// assert_eq!(body["result"], json!("ok"));
/// ```
pub struct DatatableView<T> {
	table: T,
	settings: ViewSettings,
	exporter: Option<ExporterFactory>,
}

impl<T: Datatable> DatatableView<T> {
	/// Creates a view with default settings and, with the `export` feature,
	/// the CSV exporter.
	pub fn new(table: T) -> Self {
		Self {
			table,
			settings: ViewSettings::default(),
			exporter: default_exporter(),
		}
	}

	/// Replaces the settings.
	pub fn with_settings(mut self, settings: ViewSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Replaces the exporter used for downloads.
	pub fn with_exporter<F>(mut self, factory: F) -> Self
	where
		F: Fn() -> Box<dyn Exporter> + Send + Sync + 'static,
	{
		self.exporter = Some(Arc::new(factory));
		self
	}

	/// Turns export downloads off.
	pub fn without_exporter(mut self) -> Self {
		self.exporter = None;
		self
	}

	/// Returns the wrapped table.
	pub fn table(&self) -> &T {
		&self.table
	}

	/// Returns the active settings.
	pub fn settings(&self) -> &ViewSettings {
		&self.settings
	}

	/// Answers a data or export request.
	pub fn as_json(&self, request: &DatatableRequest) -> Response<Bytes> {
		if wants_export(request) {
			return match self.export_response(request) {
				Ok(response) => response,
				Err(error) => self.error_response(request, &error),
			};
		}

		let result = Pipeline::new(&self.table, request).and_then(|pipeline| pipeline.get_context_data());
		match result {
			Ok(payload) => json_response(&DatatableResponse::ok(payload)),
			Err(error) => self.error_response(request, &error),
		}
	}

	/// Builds the export download of every filtered, ordered row.
	///
	/// # Errors
	///
	/// Fails when the pipeline fails, no exporter is configured or the
	/// exporter rejects the data.
	pub fn export_response(&self, request: &DatatableRequest) -> Result<Response<Bytes>> {
		let file = self.export(request)?;
		let disposition = HeaderValue::from_str(&format!(
			"attachment; filename=\"{}\"",
			file.filename.replace('"', "")
		))?;
		let content_type = HeaderValue::from_str(&file.content_type)?;

		let mut response = Response::new(file.bytes);
		*response.status_mut() = StatusCode::OK;
		let headers = response.headers_mut();
		headers.insert(CONTENT_TYPE, content_type);
		headers.insert(CONTENT_DISPOSITION, disposition);
		add_never_cache_headers(&mut response);
		Ok(response)
	}

	/// Produces the export file without wrapping it in a response.
	pub fn export(&self, request: &DatatableRequest) -> Result<ExportFile> {
		let factory = self
			.exporter
			.as_ref()
			.ok_or_else(|| ViewError::Export("no exporter configured".to_string()))?;

		let schema = self.table.schema();
		let title = schema.meta().title();
		let headers = schema.column_titles();
		let rows = Pipeline::new(&self.table, request)?.get_data()?;
		tracing::debug!(
			table = schema.name(),
			rows = rows.len(),
			"Exporting table rows"
		);

		let mut exporter = factory();
		exporter.add_headers(title, &headers)?;
		for row in rows {
			let row: IndexMap<String, _> = headers.iter().cloned().zip(row).collect();
			exporter.add_row(title, &row)?;
		}
		let filename = export_filename(title, exporter.extension());
		exporter.download(&filename)
	}

	fn error_response(
		&self,
		request: &DatatableRequest,
		error: &(dyn std::error::Error + 'static),
	) -> Response<Bytes> {
		tracing::error!(
			table = self.table.schema().name(),
			path = %request.path,
			error = %error_chain(error),
			details = ?error,
			"Table request failed"
		);
		let envelope = DatatableResponse::error(draw_token(request), error_text(error, &self.settings));
		json_response(&envelope)
	}
}

impl<T> fmt::Debug for DatatableView<T>
where
	T: Datatable,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DatatableView")
			.field("table", &self.table.schema().name())
			.field("settings", &self.settings)
			.field("exporter", &self.exporter.is_some())
			.finish_non_exhaustive()
	}
}

fn wants_export(request: &DatatableRequest) -> bool {
	QueryDict::parse(&request.query).get(reinhardt_tables::params::EXPORT_PARAM) == Some(EXPORT_FORMAT)
}

#[cfg(feature = "export")]
fn default_exporter() -> Option<ExporterFactory> {
	Some(Arc::new(|| -> Box<dyn Exporter> {
		Box::new(crate::export::CsvExporter::new())
	}))
}

#[cfg(not(feature = "export"))]
fn default_exporter() -> Option<ExporterFactory> {
	None
}

/// A table endpoint the registry can dispatch to.
pub trait TableEndpoint: Send + Sync {
	/// Name the endpoint is addressed by.
	fn name(&self) -> &str;

	/// Answers a request.
	fn respond(&self, request: &DatatableRequest) -> Response<Bytes>;
}

impl<T: Datatable> TableEndpoint for DatatableView<T> {
	fn name(&self) -> &str {
		self.table.schema().name()
	}

	fn respond(&self, request: &DatatableRequest) -> Response<Bytes> {
		self.as_json(request)
	}
}

/// Query parameter naming the table a shared endpoint should answer for.
pub const TABLE_NAME_PARAM: &str = "name";

/// Routes requests on one shared URL to table views by name.
///
/// # Example
///
/// ```rust
/// use http::StatusCode;
/// use reinhardt_columns::TextColumn;
/// use reinhardt_tables::datasource::MemoryDataSource;
/// use reinhardt_tables::{DatatableRequest, TableMeta, TableSchema};
/// use reinhardt_tables_views::{DatatableView, TableRegistry};
///
/// let schema = TableSchema::builder("People")
///     .column("name", TextColumn::new())
///     .meta(TableMeta::new().with_model(MemoryDataSource::new(Vec::new())))
///     .build();
/// let registry = TableRegistry::new().register(DatatableView::new(schema));
///
/// let found = registry.dispatch(&DatatableRequest::get("/tables/?name=People"));
/// assert_eq!(found.status(), StatusCode::OK);
///
/// let missing = registry.dispatch(&DatatableRequest::get("/tables/?name=Nope"));
/// assert_eq!(missing.status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Default, Clone)]
pub struct TableRegistry {
	tables: IndexMap<String, Arc<dyn TableEndpoint>>,
}

impl TableRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `endpoint` under its own name, replacing any earlier one.
	pub fn register(mut self, endpoint: impl TableEndpoint + 'static) -> Self {
		self.tables
			.insert(endpoint.name().to_string(), Arc::new(endpoint));
		self
	}

	/// Returns the endpoint registered as `name`.
	pub fn get(&self, name: &str) -> Option<&Arc<dyn TableEndpoint>> {
		self.tables.get(name)
	}

	/// Returns the registered names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	/// Answers `request` with the table named by its `name` parameter.
	///
	/// Unknown or missing names get a `404` error envelope.
	pub fn dispatch(&self, request: &DatatableRequest) -> Response<Bytes> {
		let query = QueryDict::parse(&request.query);
		let name = query.get(TABLE_NAME_PARAM).unwrap_or_default();
		if let Some(endpoint) = self.tables.get(name) {
			return endpoint.respond(request);
		}

		tracing::warn!(name, path = %request.path, "Unknown table requested");
		let envelope =
			DatatableResponse::error(draw_token(request), format!("Unknown table '{}'", name));
		let mut response = json_response(&envelope);
		*response.status_mut() = StatusCode::NOT_FOUND;
		response
	}
}

impl fmt::Debug for TableRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableRegistry")
			.field("tables", &self.tables.keys().collect::<Vec<_>>())
			.finish()
	}
}
