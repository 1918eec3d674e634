//! Columns module.
//!
//! This module provides column descriptors and URL reversal for linked cells.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_datatables::columns::{ColumnExt, DateColumn, TextColumn};
//!
//! let _name = TextColumn::new().title("Name");
//! let _joined = DateColumn::new().format("%d %b %Y");
//! ```

pub use reinhardt_columns::*;
