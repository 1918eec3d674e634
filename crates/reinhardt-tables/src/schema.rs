//! Table schema registry
//!
//! A [`TableSchema`] is the ordered, merged column set and configuration of one
//! table type. It is built once, typically in a `static` initializer, and shared
//! read-only by every request:
//!
//! ```rust
//! use std::sync::LazyLock;
//! use reinhardt_columns::{ColumnExt, DateColumn, TextColumn};
//! use reinhardt_tables::{TableMeta, TableSchema};
//!
//! static PEOPLE: LazyLock<TableSchema> = LazyLock::new(|| {
//!     TableSchema::builder("PeopleTable")
//!         .column("first_name", TextColumn::new())
//!         .column("last_name", TextColumn::new())
//!         .meta(TableMeta::new().with_search_fields(["first_name", "last_name"]))
//!         .build()
//! });
//!
//! static EMPLOYEES: LazyLock<TableSchema> = LazyLock::new(|| {
//!     TableSchema::builder("EmployeeTable")
//!         .extends(&PEOPLE)
//!         .column("start_date", DateColumn::new().title("Hired"))
//!         .without_column("first_name")
//!         .build()
//! });
//!
//! assert_eq!(EMPLOYEES.column_titles(), vec!["Last Name", "Hired"]);
//! ```
//!
//! # Django Reference
//! Django builds `declared_fields` in a metaclass by walking the MRO. Here the
//! same merge runs explicitly in [`TableSchemaBuilder::build`]:
//! - parents are walked root-most first, so the first-listed parent wins
//! - a re-declared key keeps its inherited position
//! - [`TableSchemaBuilder::without_column`] replaces shadowing with `None`

use crate::error::Result;
use crate::meta::TableMeta;
use indexmap::{IndexMap, IndexSet};
use reinhardt_columns::{Column, Row, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Input handed to a render hook.
#[derive(Debug, Clone, Copy)]
pub enum HookInput<'a> {
	/// The cell rendered so far, for columns backed by a field.
	Value(&'a Value),
	/// The whole fetched row, for data-independent columns.
	Row(&'a Row),
}

impl<'a> HookInput<'a> {
	/// Returns the rendered value, if this is a value input.
	pub fn value(&self) -> Option<&'a Value> {
		match self {
			Self::Value(value) => Some(value),
			Self::Row(_) => None,
		}
	}

	/// Returns the row, if this is a row input.
	pub fn row(&self) -> Option<&'a Row> {
		match self {
			Self::Row(row) => Some(row),
			Self::Value(_) => None,
		}
	}
}

/// Table-level render override for one column.
pub type CellHook = Arc<dyn Fn(HookInput<'_>) -> Result<Value> + Send + Sync>;

/// Per-build declaration counter.
#[derive(Debug, Default)]
pub struct Sequence {
	next: u64,
}

impl Sequence {
	/// Returns the next number, starting at 0.
	pub fn next_value(&mut self) -> u64 {
		let value = self.next;
		self.next += 1;
		value
	}
}

/// A column bound to its declaration key.
#[derive(Debug, Clone)]
pub struct BoundColumn {
	key: String,
	declaration_order: u64,
	column: Arc<dyn Column>,
}

impl BoundColumn {
	/// Returns the declaration key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the position assigned by the declaring builder.
	pub fn declaration_order(&self) -> u64 {
		self.declaration_order
	}

	/// Returns the column descriptor.
	pub fn column(&self) -> &dyn Column {
		self.column.as_ref()
	}

	/// Returns the data-source field this column reads.
	pub fn field(&self) -> &str {
		self.column.effective_field(&self.key)
	}

	/// Returns the header text.
	pub fn title(&self) -> String {
		self.column.title_for(&self.key)
	}
}

struct SchemaInner {
	name: String,
	columns: IndexMap<String, BoundColumn>,
	removed: IndexSet<String>,
	hooks: HashMap<String, CellHook>,
	meta: TableMeta,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Immutable, merged definition of a table type
///
/// Cloning is cheap; clones share the same definition.
///
/// # Architecture
///
/// ```mermaid
/// graph LR
///     subgraph Django["Django (Reference)"]
///         Metaclass["DeclarativeFieldsMetaclass"]
///         Metaclass --> declared_fields["declared_fields"]
///         Metaclass --> Meta["Meta (inherited attrs)"]
///     end
///
///     subgraph Reinhardt["Reinhardt"]
///         Builder["TableSchemaBuilder"]
///         Builder --> columns["columns()"]
///         Builder --> meta["TableMeta::merge()"]
///         Builder --> hooks["render_hook()"]
///     end
///
///     Django -.-> Reinhardt
/// ```
#[derive(Clone)]
pub struct TableSchema {
	inner: Arc<SchemaInner>,
}

impl TableSchema {
	/// Starts declaring a table named `name`.
	pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
		TableSchemaBuilder::new(name)
	}

	/// Returns the table name.
	pub fn name(&self) -> &str {
		&self.inner.name
	}

	/// Returns the merged configuration.
	pub fn meta(&self) -> &TableMeta {
		&self.inner.meta
	}

	/// Iterates the columns in display order.
	pub fn columns(&self) -> impl Iterator<Item = &BoundColumn> {
		self.inner.columns.values()
	}

	/// Returns the column declared under `key`.
	pub fn column(&self, key: &str) -> Option<&BoundColumn> {
		self.inner.columns.get(key)
	}

	/// Returns the number of columns.
	pub fn len(&self) -> usize {
		self.inner.columns.len()
	}

	/// Returns `true` if the table has no columns.
	pub fn is_empty(&self) -> bool {
		self.inner.columns.is_empty()
	}

	/// Returns the column keys in display order.
	pub fn keys(&self) -> Vec<&str> {
		self.inner.columns.keys().map(String::as_str).collect()
	}

	/// Returns the header texts in display order.
	pub fn column_titles(&self) -> Vec<String> {
		self.columns().map(BoundColumn::title).collect()
	}

	/// Returns the fields read by columns backed by a data-source field.
	pub fn values_list(&self) -> IndexSet<String> {
		self.columns()
			.filter(|bound| !bound.column().is_data_independent())
			.map(|bound| bound.field().to_string())
			.collect()
	}

	/// Returns the extra fields any column needs fetched.
	pub fn referenced_values(&self) -> IndexSet<String> {
		self.columns()
			.flat_map(|bound| bound.column().referenced_values())
			.collect()
	}

	/// Returns the exact field set fetched for every row.
	///
	/// Column fields first, then `extra_fields`, then referenced values.
	pub fn projection(&self) -> IndexSet<String> {
		let mut fields = self.values_list();
		fields.extend(self.meta().extra_fields().iter().cloned());
		fields.extend(self.referenced_values());
		fields
	}

	/// Returns the data-source field of the column at `index`.
	pub fn field_by_index(&self, index: usize) -> Option<&str> {
		self.inner
			.columns
			.get_index(index)
			.map(|(_, bound)| bound.field())
	}

	/// Returns the display index of the column declared under `key`.
	pub fn index_by_key(&self, key: &str) -> Option<usize> {
		self.inner.columns.get_index_of(key)
	}

	/// Returns the render hook registered for `key`.
	pub fn hook(&self, key: &str) -> Option<&CellHook> {
		self.inner.hooks.get(key)
	}
}

impl fmt::Debug for TableSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut hooks: Vec<&str> = self.inner.hooks.keys().map(String::as_str).collect();
		hooks.sort_unstable();
		f.debug_struct("TableSchema")
			.field("name", &self.inner.name)
			.field("columns", &self.keys())
			.field("hooks", &hooks)
			.field("meta", &self.inner.meta)
			.finish()
	}
}

/// Builder for [`TableSchema`].
pub struct TableSchemaBuilder {
	name: String,
	parents: Vec<TableSchema>,
	sequence: Sequence,
	columns: Vec<BoundColumn>,
	removed: IndexSet<String>,
	hooks: HashMap<String, CellHook>,
	meta: TableMeta,
}

impl TableSchemaBuilder {
	fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			parents: Vec::new(),
			sequence: Sequence::default(),
			columns: Vec::new(),
			removed: IndexSet::new(),
			hooks: HashMap::new(),
			meta: TableMeta::default(),
		}
	}

	/// Inherits from `parent`. Parents listed earlier take precedence.
	pub fn extends(mut self, parent: &TableSchema) -> Self {
		self.parents.push(parent.clone());
		self
	}

	/// Declares a column under `key`.
	///
	/// Declaring the same key twice keeps only the later declaration.
	pub fn column(mut self, key: impl Into<String>, column: impl Column + 'static) -> Self {
		let key = key.into();
		self.columns.retain(|bound| bound.key != key);
		self.columns.push(BoundColumn {
			key,
			declaration_order: self.sequence.next_value(),
			column: Arc::new(column),
		});
		self
	}

	/// Removes an inherited column.
	pub fn without_column(mut self, key: impl Into<String>) -> Self {
		self.removed.insert(key.into());
		self
	}

	/// Registers a render hook for the column declared under `key`.
	pub fn render_hook<F>(mut self, key: impl Into<String>, hook: F) -> Self
	where
		F: Fn(HookInput<'_>) -> Result<Value> + Send + Sync + 'static,
	{
		self.hooks.insert(key.into(), Arc::new(hook));
		self
	}

	/// Sets this table's own configuration.
	pub fn meta(mut self, meta: TableMeta) -> Self {
		self.meta = meta;
		self
	}

	/// Merges the declarations with every parent.
	pub fn build(self) -> TableSchema {
		let mut own = self.columns;
		own.sort_by_key(|bound| bound.declaration_order);

		let mut columns: IndexMap<String, BoundColumn> = IndexMap::new();
		let mut hooks: HashMap<String, CellHook> = HashMap::new();
		for parent in self.parents.iter().rev() {
			for bound in parent.columns() {
				columns.insert(bound.key.clone(), bound.clone());
			}
			for key in &parent.inner.removed {
				columns.shift_remove(key);
			}
			hooks.extend(
				parent
					.inner
					.hooks
					.iter()
					.map(|(key, hook)| (key.clone(), Arc::clone(hook))),
			);
		}
		for key in &self.removed {
			columns.shift_remove(key);
		}
		for bound in own {
			columns.insert(bound.key.clone(), bound);
		}
		hooks.extend(self.hooks);

		let inherited = self
			.parents
			.iter()
			.fold(TableMeta::default(), |merged, parent| {
				merged.merge(parent.meta().clone())
			});
		let meta = self.meta.merge(inherited);

		TableSchema {
			inner: Arc::new(SchemaInner {
				name: self.name,
				columns,
				removed: self.removed,
				hooks,
				meta,
			}),
		}
	}
}
