//! Table behavior hooks
//!
//! [`Datatable`] is the overridable surface of a table: where its rows come
//! from, which extra filters apply, how cells are post-processed and how links
//! are reversed. A bare [`TableSchema`] is a complete table with the default
//! behavior; wrap it in a type of your own to override a stage.
//!
//! ```rust
//! use reinhardt_columns::TextColumn;
//! use reinhardt_tables::datasource::{Dataset, Lookup, LookupKind, Predicate};
//! use reinhardt_tables::{Datatable, RequestParams, Result, TableSchema};
//! use serde_json::json;
//!
//! struct ActiveOnly {
//!     schema: TableSchema,
//! }
//!
//! impl Datatable for ActiveOnly {
//!     fn schema(&self) -> &TableSchema {
//!         &self.schema
//!     }
//!
//!     fn filter_by_filters(
//!         &self,
//!         dataset: Box<dyn Dataset>,
//!         _params: &RequestParams,
//!     ) -> Result<Box<dyn Dataset>> {
//!         let active = Lookup::new("active", LookupKind::Exact, json!(true));
//!         Ok(dataset.filter(&Predicate::Lookup(active))?)
//!     }
//! }
//! ```

use crate::datasource::Dataset;
use crate::error::{Result, TableError};
use crate::params::RequestParams;
use crate::pipeline::Pipeline;
use crate::request::DatatableRequest;
use crate::schema::{BoundColumn, CellHook, TableSchema};
use reinhardt_columns::{NoRoutes, UrlResolver};
use std::sync::Arc;

/// A table that can answer data requests.
pub trait Datatable: Send + Sync {
	/// Returns the merged schema.
	fn schema(&self) -> &TableSchema;

	/// Returns the unfiltered rows for `request`.
	///
	/// The default reads the configured model and fails with
	/// [`TableError::ImproperlyConfigured`] when there is none.
	fn initial_dataset(&self, _request: &DatatableRequest) -> Result<Box<dyn Dataset>> {
		let schema = self.schema();
		let model = schema.meta().model().ok_or_else(|| {
			TableError::ImproperlyConfigured(format!(
				"{} needs a model or an initial_dataset override",
				schema.name()
			))
		})?;
		Ok(model.all()?)
	}

	/// Applies filters beyond the search term.
	///
	/// The default applies the request's `additional_data` as exact matches.
	fn filter_by_filters(
		&self,
		dataset: Box<dyn Dataset>,
		params: &RequestParams,
	) -> Result<Box<dyn Dataset>> {
		if params.additional_filters.is_empty() {
			return Ok(dataset);
		}
		Ok(dataset.filter_exact(&params.additional_filters)?)
	}

	/// Returns the render hook for `column`.
	///
	/// The default looks the hook up by column key, then by data-source field.
	fn render_hook(&self, column: &BoundColumn) -> Option<CellHook> {
		let schema = self.schema();
		schema
			.hook(column.key())
			.or_else(|| schema.hook(column.field()))
			.cloned()
	}

	/// Returns the resolver used for column links.
	fn url_resolver(&self) -> Arc<dyn UrlResolver> {
		self.schema()
			.meta()
			.url_resolver()
			.cloned()
			.unwrap_or_else(|| Arc::new(NoRoutes))
	}

	/// Starts a pipeline for `request`.
	fn pipeline<'a>(&'a self, request: &'a DatatableRequest) -> Result<Pipeline<'a, Self>>
	where
		Self: Sized,
	{
		Pipeline::new(self, request)
	}
}

impl Datatable for TableSchema {
	fn schema(&self) -> &TableSchema {
		self
	}
}

impl<T: Datatable + ?Sized> Datatable for Arc<T> {
	fn schema(&self) -> &TableSchema {
		(**self).schema()
	}

	fn initial_dataset(&self, request: &DatatableRequest) -> Result<Box<dyn Dataset>> {
		(**self).initial_dataset(request)
	}

	fn filter_by_filters(
		&self,
		dataset: Box<dyn Dataset>,
		params: &RequestParams,
	) -> Result<Box<dyn Dataset>> {
		(**self).filter_by_filters(dataset, params)
	}

	fn render_hook(&self, column: &BoundColumn) -> Option<CellHook> {
		(**self).render_hook(column)
	}

	fn url_resolver(&self) -> Arc<dyn UrlResolver> {
		(**self).url_resolver()
	}
}
