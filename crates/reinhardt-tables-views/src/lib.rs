//! HTTP responses for Reinhardt data tables
//!
//! Wraps a [`Datatable`](reinhardt_tables::Datatable) in an endpoint that
//! speaks the grid widget's protocol: a JSON envelope for data requests, a file
//! download for exports and the one-time widget configuration a page embeds.
//!
//! # Features
//!
//! - **JSON envelope**: [`DatatableResponse`] with counts, rows and an inline error field
//! - **Views**: [`DatatableView`] for one table, [`TableRegistry`] for a shared endpoint
//! - **Export**: the [`Exporter`] trait plus a CSV implementation (feature `export`)
//! - **Widget configuration**: [`datatable_config`] and [`render_context`]
//! - **Settings**: debug-dependent error detail ([`ViewSettings`])
//!
//! # Architecture
//!
//! ```mermaid
//! graph LR
//!     A[DatatableRequest] --> B[TableRegistry]
//!     B --> C[DatatableView]
//!     C -->|export=excel| D[Exporter]
//!     C --> E[Pipeline]
//!     E --> F[DatatableResponse]
//!     D --> G[ExportFile]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_columns::TextColumn;
//! use reinhardt_tables::datasource::MemoryDataSource;
//! use reinhardt_tables::{DatatableRequest, TableMeta, TableSchema};
//! use reinhardt_tables_views::{DatatableView, ViewSettings};
//! use serde_json::json;
//!
//! let schema = TableSchema::builder("People")
//!     .column("name", TextColumn::new())
//!     .meta(TableMeta::new())
//!     .build();
//!
//! // No model configured: the failure is reported inside a 200 envelope.
//! let view = DatatableView::new(schema).with_settings(ViewSettings::default());
//! let response = view.as_json(&DatatableRequest::get("/people/?draw=3"));
//!
//! assert_eq!(response.status(), http::StatusCode::OK);
//! let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
//! assert_eq!(body["draw"], json!(3));
//! assert_eq!(body["result"], json!("error"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod export;
pub mod response;
pub mod settings;
pub mod view;

pub use config::{ColumnConfig, TableContext, WidgetConfig, datatable_config, render_context};
pub use error::{Result, ViewError};
pub use export::{EXPORT_FORMAT, ExportFile, Exporter, export_filename};
#[cfg(feature = "export")]
pub use export::CsvExporter;
pub use response::{
	DatatableResponse, NEVER_CACHE, ResponseStatus, error_chain, error_text, json_response,
};
pub use settings::{DEFAULT_ERROR_MESSAGE, ViewSettings};
pub use view::{DatatableView, ExporterFactory, TABLE_NAME_PARAM, TableEndpoint, TableRegistry};
