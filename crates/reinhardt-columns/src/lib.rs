//! Column descriptors for server-driven data tables
//!
//! A column describes how one cell of a table row is sourced from a data source
//! and rendered for a client-side grid widget. Columns are plain values built
//! once when a table schema is declared and shared read-only by every request.
//!
//! # Features
//!
//! - **Column trait**: scalar render, row-aware render and link wrapping stages
//! - **Column Types**: text, date, icon, constant text, checkbox, bulleted list, computed string
//! - **Links**: `#literal` / `.attribute` / row-field link arguments reversed through a [`UrlResolver`]
//!
//! # Example
//!
//! ```rust
//! use reinhardt_columns::{Column, ColumnExt, RouteTable, TextColumn};
//! use serde_json::{Map, json};
//!
//! let routes = RouteTable::new().route("detail", "/employees/{id}/");
//! let column = TextColumn::new().link("detail", ["id"]);
//!
//! let mut row = Map::new();
//! row.insert("id".to_string(), json!(42));
//!
//! let cell = column.render_link(json!("X"), &row, &routes).unwrap();
//! assert_eq!(cell, json!(r#"<a href="/employees/42/">X</a>"#));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod columns;
pub mod error;
pub mod link;
pub mod value;

// Re-exports for convenience
pub use column::{Column, ColumnExt, ColumnOptions, option_attribute};
pub use columns::{
	BulletedListColumn, CheckBoxColumn, ConstantTextColumn, DateColumn, FontAwesome4Column,
	FontAwesome5Column, GlyphiconColumn, StringColumn, TextColumn,
};
pub use error::{ColumnError, Result};
pub use link::{LinkArg, NoRoutes, RouteTable, UrlResolver};
pub use value::{Row, Value};
