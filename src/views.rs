//! Views module.
//!
//! This module provides the JSON endpoints, export downloads and widget
//! configuration of data tables.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_datatables::views::{DatatableView, TableRegistry, ViewSettings};
//! ```

pub use reinhardt_tables_views::*;
