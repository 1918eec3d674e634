//! # Reinhardt Datatables
//!
//! Server-side processing for DataTables-style grids, inspired by Django
//! datatables integrations.
//!
//! A table is declared once as an ordered set of columns plus configuration.
//! Each data request from the grid then runs through a fixed pipeline (search,
//! custom filters, counts, ordering, paging, projection, rendering) and is
//! answered with a JSON envelope the widget understands.
//!
//! ## Crates
//!
//! - [`columns`] - column descriptors, link arguments and URL reversal
//! - [`tables`] - schemas, inheritance, data sources and the pipeline
//! - [`views`] - JSON envelope, export downloads and widget configuration
//!
//! ## Feature Flags
//!
//! - `export` (default) - CSV export downloads
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_datatables::prelude::*;
//! use serde_json::json;
//!
//! let source = MemoryDataSource::from_values(vec![
//!     json!({"id": 1, "name": "Ann", "joined": "2021-03-01"}),
//!     json!({"id": 2, "name": "Bob", "joined": "2019-07-15"}),
//! ]);
//! let table = TableSchema::builder("People")
//!     .column("name", TextColumn::new().link("person", ["id"]))
//!     .column("joined", DateColumn::new())
//!     .meta(
//!         TableMeta::new()
//!             .with_model(source)
//!             .with_search_fields(["name"])
//!             .with_url_resolver(RouteTable::new().route("person", "/people/{id}/")),
//!     )
//!     .build();
//!
//! let view = DatatableView::new(table);
//! let response = view.as_json(&DatatableRequest::get("/people/?draw=1&search[value]=bo"));
//!
//! let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
//! assert_eq!(body["recordsTotal"], json!(2));
//! assert_eq!(body["recordsFiltered"], json!(1));
//! assert_eq!(body["data"], json!([[r#"<a href="/people/2/">Bob</a>"#, "2019-07-15"]]));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod columns;
pub mod tables;
pub mod views;

/// Re-exports of the types most table definitions need.
pub mod prelude {
	// Columns
	pub use crate::columns::{
		BulletedListColumn, CheckBoxColumn, Column, ColumnExt, ColumnOptions, ConstantTextColumn,
		DateColumn, FontAwesome4Column, FontAwesome5Column, GlyphiconColumn, LinkArg,
		RouteTable, Row, StringColumn, TextColumn, UrlResolver, Value,
	};

	// Tables
	pub use crate::tables::datasource::{DataSource, Dataset, MemoryDataSource};
	pub use crate::tables::{
		Datatable, DatatableRequest, HookInput, Pipeline, RequestParams, TableError, TableMeta,
		TableSchema,
	};

	// Views
	pub use crate::views::{DatatableView, TableRegistry, ViewError, ViewSettings, datatable_config};
}
