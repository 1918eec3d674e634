//! Server-side processing for data tables in Reinhardt
//!
//! This crate binds declarative column definitions to a request-driven
//! paging/sorting/filtering/rendering pipeline, in the manner of Django
//! datatables integrations: the client-side grid sends paging, ordering and
//! search parameters, the server narrows a data source and answers with
//! record counts and rendered rows.
//!
//! # Features
//!
//! - **Table Schema**: ordered, inheritable column sets built once with [`TableSchema::builder`]
//! - **Meta**: typed per-table configuration with inheritance-aware merging ([`TableMeta`])
//! - **Data Sources**: object-safe [`DataSource`](datasource::DataSource) / [`Dataset`](datasource::Dataset) interfaces plus an in-memory implementation
//! - **Parameters**: bracket-key request decoding ([`QueryDict`], [`RequestParams`])
//! - **Pipeline**: search, custom filters, counts, ordering, paging, projection and rendering ([`Pipeline`])
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[TableSchema] --> B[BoundColumn]
//!     A --> C[TableMeta]
//!     A --> D[Render hooks]
//!     E[Datatable] --> A
//!     F[Pipeline] --> E
//!     F --> G[RequestParams]
//!     F --> H[DataSource / Dataset]
//!     F --> I[PipelinePayload]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_columns::{ColumnExt, TextColumn};
//! use reinhardt_tables::datasource::MemoryDataSource;
//! use reinhardt_tables::{Datatable, DatatableRequest, TableMeta, TableSchema};
//! use serde_json::json;
//!
//! let schema = TableSchema::builder("PeopleTable")
//!     .column("first", TextColumn::new().title("First name"))
//!     .meta(
//!         TableMeta::new()
//!             .with_model(MemoryDataSource::from_values(vec![
//!                 json!({"first": "Ann"}),
//!                 json!({"first": "Bob"}),
//!             ]))
//!             .with_search_fields(["first"]),
//!     )
//!     .build();
//!
//! let request = DatatableRequest::get("/people/?draw=1&search[value]=bo");
//! let payload = schema.pipeline(&request).unwrap().get_context_data().unwrap();
//!
//! assert_eq!(payload.records_total, 2);
//! assert_eq!(payload.records_filtered, 1);
//! assert_eq!(payload.data, vec![vec![json!("Bob")]]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod datasource;
pub mod error;
pub mod meta;
pub mod params;
pub mod payload;
pub mod pipeline;
pub mod querystring;
pub mod request;
pub mod schema;
pub mod table;

// Re-exports for convenience
pub use error::{QueryError, Result, TableError};
pub use meta::TableMeta;
pub use params::{ColumnRequestData, RequestParams, SortDescriptor, SortDirection, draw_token};
pub use payload::PipelinePayload;
pub use pipeline::Pipeline;
pub use querystring::QueryDict;
pub use request::DatatableRequest;
pub use schema::{BoundColumn, CellHook, HookInput, TableSchema, TableSchemaBuilder};
pub use table::Datatable;
