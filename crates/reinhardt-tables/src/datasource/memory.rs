//! In-memory data source over JSON rows

use super::{Dataset, DataSource, Lookup, LookupKind, OrderSpec, Predicate, QueryResult};
use crate::error::QueryError;
use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};
use reinhardt_columns::value::display;
use reinhardt_columns::{Row, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// A data source holding its rows in memory.
///
/// Field names are the union of every row's keys plus any declared with
/// [`MemoryDataSource::with_fields`]. Naming any other field in a lookup, an
/// ordering or a projection fails with [`QueryError::UnknownField`], except on a
/// source that knows no fields at all.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexSet;
/// use reinhardt_tables::datasource::{DataSource, MemoryDataSource, OrderSpec};
/// use serde_json::json;
///
/// let source = MemoryDataSource::from_values(vec![
///     json!({"first": "B"}),
///     json!({"first": "A"}),
/// ]);
/// let dataset = source.all().unwrap().order_by(&[OrderSpec::asc("first")]).unwrap();
/// let fields: IndexSet<String> = ["first".to_string()].into_iter().collect();
/// let rows = dataset.values(&fields).unwrap();
/// assert_eq!(rows[0]["first"], json!("A"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
	rows: Arc<Vec<Row>>,
	fields: Arc<IndexSet<String>>,
}

impl MemoryDataSource {
	/// Creates a data source over `rows`.
	pub fn new(rows: Vec<Row>) -> Self {
		let fields = rows.iter().flat_map(|row| row.keys().cloned()).collect();
		Self {
			rows: Arc::new(rows),
			fields: Arc::new(fields),
		}
	}

	/// Creates a data source from JSON objects; other values are skipped.
	pub fn from_values(values: Vec<Value>) -> Self {
		Self::new(
			values
				.into_iter()
				.filter_map(|value| match value {
					Value::Object(row) => Some(row),
					_ => None,
				})
				.collect(),
		)
	}

	/// Declares additional field names, e.g. for columns absent from every row.
	pub fn with_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut known = (*self.fields).clone();
		known.extend(fields.into_iter().map(Into::into));
		self.fields = Arc::new(known);
		self
	}

	/// Returns the number of rows held.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns `true` if no rows are held.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl DataSource for MemoryDataSource {
	fn all(&self) -> QueryResult<Box<dyn Dataset>> {
		Ok(Box::new(MemoryDataset {
			rows: self.rows.as_ref().clone(),
			fields: Arc::clone(&self.fields),
		}))
	}
}

/// Rows selected from a [`MemoryDataSource`].
#[derive(Debug, Clone)]
pub struct MemoryDataset {
	rows: Vec<Row>,
	fields: Arc<IndexSet<String>>,
}

impl MemoryDataset {
	fn check_field(&self, field: &str) -> QueryResult<()> {
		if self.fields.is_empty() || self.fields.contains(field) {
			Ok(())
		} else {
			Err(QueryError::UnknownField(field.to_string()))
		}
	}

	fn compile(&self, predicate: &Predicate) -> QueryResult<Matcher> {
		match predicate {
			Predicate::Lookup(lookup) => {
				self.check_field(&lookup.field)?;
				Matcher::lookup(lookup)
			}
			Predicate::And(children) => Ok(Matcher::And(
				children
					.iter()
					.map(|child| self.compile(child))
					.collect::<QueryResult<_>>()?,
			)),
			Predicate::Or(children) => Ok(Matcher::Or(
				children
					.iter()
					.map(|child| self.compile(child))
					.collect::<QueryResult<_>>()?,
			)),
		}
	}
}

impl Dataset for MemoryDataset {
	fn filter(self: Box<Self>, predicate: &Predicate) -> QueryResult<Box<dyn Dataset>> {
		let matcher = self.compile(predicate)?;
		let MemoryDataset { rows, fields } = *self;
		let rows = rows.into_iter().filter(|row| matcher.matches(row)).collect();
		Ok(Box::new(MemoryDataset { rows, fields }))
	}

	fn order_by(mut self: Box<Self>, specs: &[OrderSpec]) -> QueryResult<Box<dyn Dataset>> {
		for spec in specs {
			self.check_field(&spec.field)?;
		}
		// Vec::sort_by is stable, so ties keep their current order
		self.rows.sort_by(|a, b| {
			specs
				.iter()
				.map(|spec| {
					let ordering = compare(field_value(a, &spec.field), field_value(b, &spec.field));
					if spec.descending {
						ordering.reverse()
					} else {
						ordering
					}
				})
				.find(|ordering| ordering.is_ne())
				.unwrap_or(Ordering::Equal)
		});
		Ok(self)
	}

	fn count(&self) -> QueryResult<usize> {
		Ok(self.rows.len())
	}

	fn slice(mut self: Box<Self>, start: usize, stop: Option<usize>) -> QueryResult<Box<dyn Dataset>> {
		let len = self.rows.len();
		let start = start.min(len);
		let stop = stop.map_or(len, |stop| stop.clamp(start, len));
		self.rows = self.rows.drain(start..stop).collect();
		Ok(self)
	}

	fn values(&self, fields: &IndexSet<String>) -> QueryResult<Vec<Row>> {
		for field in fields {
			self.check_field(field)?;
		}
		Ok(self
			.rows
			.iter()
			.map(|row| {
				fields
					.iter()
					.filter_map(|field| row.get(field).map(|value| (field.clone(), value.clone())))
					.collect()
			})
			.collect())
	}
}

fn field_value<'a>(row: &'a Row, field: &str) -> &'a Value {
	row.get(field).unwrap_or(&Value::Null)
}

fn type_rank(value: &Value) -> u8 {
	match value {
		Value::Null => 0,
		Value::Bool(_) => 1,
		Value::Number(_) => 2,
		Value::String(_) => 3,
		Value::Array(_) => 4,
		Value::Object(_) => 5,
	}
}

/// Total order over JSON values: nulls first, then by type, then by value.
fn compare(a: &Value, b: &Value) -> Ordering {
	match (a, b) {
		(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
		(Value::Number(x), Value::Number(y)) => {
			let x = x.as_f64().unwrap_or(f64::NAN);
			let y = y.as_f64().unwrap_or(f64::NAN);
			x.total_cmp(&y)
		}
		(Value::String(x), Value::String(y)) => x.cmp(y),
		_ if type_rank(a) == type_rank(b) => display(a).cmp(&display(b)),
		_ => type_rank(a).cmp(&type_rank(b)),
	}
}

/// A predicate with its patterns compiled.
enum Matcher {
	Lookup {
		field: String,
		test: Test,
	},
	And(Vec<Matcher>),
	Or(Vec<Matcher>),
}

enum Test {
	Exact(Value),
	IExact(String),
	Contains(String),
	IContains(String),
	StartsWith(String),
	IStartsWith(String),
	EndsWith(String),
	IEndsWith(String),
	Search(Vec<String>),
	Regex(Regex),
}

impl Matcher {
	fn lookup(lookup: &Lookup) -> QueryResult<Self> {
		let text = display(&lookup.value);
		let test = match lookup.kind {
			LookupKind::Exact => Test::Exact(lookup.value.clone()),
			LookupKind::IExact => Test::IExact(text.to_lowercase()),
			LookupKind::Contains => Test::Contains(text),
			LookupKind::IContains => Test::IContains(text.to_lowercase()),
			LookupKind::StartsWith => Test::StartsWith(text),
			LookupKind::IStartsWith => Test::IStartsWith(text.to_lowercase()),
			LookupKind::EndsWith => Test::EndsWith(text),
			LookupKind::IEndsWith => Test::IEndsWith(text.to_lowercase()),
			LookupKind::Search => Test::Search(
				text.split_whitespace()
					.map(str::to_lowercase)
					.collect(),
			),
			LookupKind::Regex | LookupKind::IRegex => {
				let regex = RegexBuilder::new(&text)
					.case_insensitive(lookup.kind == LookupKind::IRegex)
					.build()
					.map_err(|e| QueryError::InvalidPattern {
						pattern: text.clone(),
						message: e.to_string(),
					})?;
				Test::Regex(regex)
			}
		};
		Ok(Self::Lookup {
			field: lookup.field.clone(),
			test,
		})
	}

	fn matches(&self, row: &Row) -> bool {
		match self {
			Self::Lookup { field, test } => test.matches(field_value(row, field)),
			Self::And(children) => children.iter().all(|child| child.matches(row)),
			Self::Or(children) => children.iter().any(|child| child.matches(row)),
		}
	}
}

impl Test {
	fn matches(&self, value: &Value) -> bool {
		if let Self::Exact(expected) = self {
			return loose_eq(value, expected);
		}
		// Pattern lookups never match a missing value
		if value.is_null() {
			return false;
		}
		let text = display(value);
		match self {
			Self::Exact(_) => false,
			Self::IExact(expected) => text.to_lowercase() == *expected,
			Self::Contains(needle) => text.contains(needle.as_str()),
			Self::IContains(needle) => text.to_lowercase().contains(needle.as_str()),
			Self::StartsWith(prefix) => text.starts_with(prefix.as_str()),
			Self::IStartsWith(prefix) => text.to_lowercase().starts_with(prefix.as_str()),
			Self::EndsWith(suffix) => text.ends_with(suffix.as_str()),
			Self::IEndsWith(suffix) => text.to_lowercase().ends_with(suffix.as_str()),
			Self::Search(terms) => {
				let text = text.to_lowercase();
				terms.iter().all(|term| text.contains(term.as_str()))
			}
			Self::Regex(regex) => regex.is_match(&text),
		}
	}
}

/// Equality that lets query-string text match typed values (`"5"` == `5`).
fn loose_eq(value: &Value, expected: &Value) -> bool {
	match (value, expected) {
		(Value::Null, Value::Null) => true,
		(Value::Null, _) | (_, Value::Null) => false,
		(Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
		_ if type_rank(value) == type_rank(expected) => value == expected,
		_ => display(value) == display(expected),
	}
}
