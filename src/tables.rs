//! Tables module.
//!
//! This module provides table schemas, data sources and the request pipeline.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_datatables::tables::{Datatable, TableMeta, TableSchema};
//! ```

pub use reinhardt_tables::*;
