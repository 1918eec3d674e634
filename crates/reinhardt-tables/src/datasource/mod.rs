//! Data source interfaces
//!
//! The pipeline never talks to storage directly. It asks a [`DataSource`] for the
//! full candidate set and narrows it through [`Dataset`] operations: filter,
//! order, count, slice and finally `values`, which fetches the projected fields
//! of the remaining rows. Implementations decide whether these operations are
//! lazy query-builder steps or eager in-memory transformations.

mod memory;

pub use memory::{MemoryDataSource, MemoryDataset};

use crate::error::QueryError;
use indexmap::{IndexMap, IndexSet};
use reinhardt_columns::{Row, Value};
use std::fmt;

/// Result type alias for data source operations
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Separator between a field path and its lookup kind (`name__icontains`).
pub const LOOKUP_SEP: &str = "__";

/// A configured data source a table reads from.
pub trait DataSource: Send + Sync {
	/// Returns the full, unfiltered candidate set.
	fn all(&self) -> QueryResult<Box<dyn Dataset>>;
}

/// A narrowed set of records.
///
/// Every narrowing operation consumes the dataset and returns the next one.
pub trait Dataset: Send {
	/// Keeps the records matching `predicate`.
	fn filter(self: Box<Self>, predicate: &Predicate) -> QueryResult<Box<dyn Dataset>>;

	/// Keeps the records matching every `field[__kind] = value` constraint.
	///
	/// Keys without a lookup suffix compare with [`LookupKind::Exact`].
	fn filter_exact(
		self: Box<Self>,
		constraints: &IndexMap<String, Value>,
	) -> QueryResult<Box<dyn Dataset>> {
		let lookups = constraints
			.iter()
			.map(|(path, value)| {
				Predicate::Lookup(Lookup::from_path(path, value.clone(), LookupKind::Exact))
			})
			.collect();
		self.filter(&Predicate::And(lookups))
	}

	/// Orders the records by `specs`, left to right.
	fn order_by(self: Box<Self>, specs: &[OrderSpec]) -> QueryResult<Box<dyn Dataset>>;

	/// Counts the records.
	fn count(&self) -> QueryResult<usize>;

	/// Keeps the records in `[start, stop)`; `None` keeps everything from `start`.
	fn slice(self: Box<Self>, start: usize, stop: Option<usize>) -> QueryResult<Box<dyn Dataset>>;

	/// Fetches `fields` for every record, in dataset order.
	fn values(&self, fields: &IndexSet<String>) -> QueryResult<Vec<Row>>;
}

/// How a lookup compares a field with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
	/// Equal.
	Exact,
	/// Equal, ignoring case.
	IExact,
	/// Substring.
	Contains,
	/// Substring, ignoring case.
	IContains,
	/// Prefix.
	StartsWith,
	/// Prefix, ignoring case.
	IStartsWith,
	/// Suffix.
	EndsWith,
	/// Suffix, ignoring case.
	IEndsWith,
	/// Full-text style search; backend defined.
	Search,
	/// Regular expression.
	Regex,
	/// Regular expression, ignoring case.
	IRegex,
}

impl LookupKind {
	/// All lookup kinds.
	pub const ALL: [LookupKind; 11] = [
		Self::Exact,
		Self::IExact,
		Self::Contains,
		Self::IContains,
		Self::StartsWith,
		Self::IStartsWith,
		Self::EndsWith,
		Self::IEndsWith,
		Self::Search,
		Self::Regex,
		Self::IRegex,
	];

	/// Returns the suffix that selects this lookup in a field path.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Exact => "exact",
			Self::IExact => "iexact",
			Self::Contains => "contains",
			Self::IContains => "icontains",
			Self::StartsWith => "startswith",
			Self::IStartsWith => "istartswith",
			Self::EndsWith => "endswith",
			Self::IEndsWith => "iendswith",
			Self::Search => "search",
			Self::Regex => "regex",
			Self::IRegex => "iregex",
		}
	}

	/// Parses a lookup suffix.
	pub fn from_suffix(suffix: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == suffix)
	}

	/// Splits `field__kind` into the field path and its explicit lookup kind.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_tables::datasource::LookupKind;
	///
	/// assert_eq!(
	///     LookupKind::split_path("name__istartswith"),
	///     ("name", Some(LookupKind::IStartsWith))
	/// );
	/// assert_eq!(LookupKind::split_path("manager__name"), ("manager__name", None));
	/// assert_eq!(LookupKind::split_path("exact"), ("exact", None));
	/// ```
	pub fn split_path(path: &str) -> (&str, Option<Self>) {
		match path.rsplit_once(LOOKUP_SEP) {
			Some((field, suffix)) if !field.is_empty() => match Self::from_suffix(suffix) {
				Some(kind) => (field, Some(kind)),
				None => (path, None),
			},
			_ => (path, None),
		}
	}
}

impl fmt::Display for LookupKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One field comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
	/// Field path.
	pub field: String,
	/// Comparison.
	pub kind: LookupKind,
	/// Right-hand side.
	pub value: Value,
}

impl Lookup {
	/// Creates a lookup.
	pub fn new(field: impl Into<String>, kind: LookupKind, value: Value) -> Self {
		Self {
			field: field.into(),
			kind,
			value,
		}
	}

	/// Builds a lookup from a `field[__kind]` path, using `default` when the
	/// path carries no suffix.
	pub fn from_path(path: &str, value: Value, default: LookupKind) -> Self {
		let (field, kind) = LookupKind::split_path(path);
		Self::new(field, kind.unwrap_or(default), value)
	}
}

/// A filter condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	/// A single comparison.
	Lookup(Lookup),
	/// All children match; empty matches everything.
	And(Vec<Predicate>),
	/// Any child matches; empty matches nothing.
	Or(Vec<Predicate>),
}

/// One ordering term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
	/// Field path.
	pub field: String,
	/// `true` for descending order.
	pub descending: bool,
}

impl OrderSpec {
	/// Ascending order on `field`.
	pub fn asc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			descending: false,
		}
	}

	/// Descending order on `field`.
	pub fn desc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			descending: true,
		}
	}

	/// Parses `field` or `-field`.
	pub fn parse(spec: &str) -> Self {
		match spec.strip_prefix('-') {
			Some(field) => Self::desc(field),
			None => Self::asc(spec),
		}
	}
}

impl fmt::Display for OrderSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.descending {
			write!(f, "-{}", self.field)
		} else {
			f.write_str(&self.field)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("name__exact", "name", Some(LookupKind::Exact))]
	#[case("name__iregex", "name", Some(LookupKind::IRegex))]
	#[case("manager__last_name__endswith", "manager__last_name", Some(LookupKind::EndsWith))]
	#[case("manager__last_name", "manager__last_name", None)]
	#[case("__contains", "__contains", None)]
	#[case("name", "name", None)]
	fn test_split_path(
		#[case] path: &str,
		#[case] field: &str,
		#[case] kind: Option<LookupKind>,
	) {
		assert_eq!(LookupKind::split_path(path), (field, kind));
	}

	#[rstest]
	fn test_lookup_from_path_uses_default() {
		let lookup = Lookup::from_path("name", json!("al"), LookupKind::IContains);
		assert_eq!(lookup, Lookup::new("name", LookupKind::IContains, json!("al")));
	}

	#[rstest]
	#[case("-start_date", OrderSpec::desc("start_date"))]
	#[case("last_name", OrderSpec::asc("last_name"))]
	fn test_order_spec_parse(#[case] spec: &str, #[case] expected: OrderSpec) {
		assert_eq!(OrderSpec::parse(spec), expected);
		assert_eq!(expected.to_string(), spec);
	}
}
