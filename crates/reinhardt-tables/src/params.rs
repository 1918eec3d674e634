//! Request parameter extraction
//!
//! Reads the paging, ordering, search and filter parameters a grid widget sends
//! with every data request.

use crate::error::{Result, TableError};
use crate::querystring::QueryDict;
use crate::request::DatatableRequest;
use indexmap::IndexMap;
use reinhardt_columns::Value;
use reinhardt_columns::value::display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query flag selecting export mode.
pub const EXPORT_PARAM: &str = "export";

/// Sort direction of one sort descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order (A to Z, 0 to 9)
	#[default]
	Asc,
	/// Descending order (Z to A, 9 to 0)
	Desc,
}

impl SortDirection {
	/// Parses a client direction; anything but `desc` is ascending.
	pub fn parse(value: &str) -> Self {
		if value == "desc" { Self::Desc } else { Self::Asc }
	}

	/// Returns the wire name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One `order[i]` entry: a column position and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDescriptor {
	/// 0-based column index in display order.
	pub column: usize,
	/// Direction.
	pub direction: SortDirection,
}

/// One `columns[i]` entry as sent by the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRequestData {
	/// `columns[i][name]`
	pub name: String,
	/// `columns[i][data]`
	pub data: String,
	/// `columns[i][searchable]`
	pub searchable: bool,
	/// `columns[i][orderable]`
	pub orderable: bool,
	/// `columns[i][search][value]`
	pub search_value: String,
	/// `columns[i][search][regex]`
	pub search_regex: bool,
}

/// Parameters of one data request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
	/// Echoed correlation token.
	pub draw: i64,
	/// Offset of the first row.
	pub start: usize,
	/// Requested page length; `None` when the client asked for every row.
	pub length: Option<usize>,
	/// Free-text search term, if non-empty.
	pub search: Option<String>,
	/// Sort descriptors, left to right.
	pub order: Vec<SortDescriptor>,
	/// Per-column widget state.
	pub columns: Vec<ColumnRequestData>,
	/// Caller-supplied exact-match constraints from `additional_data`.
	pub additional_filters: IndexMap<String, Value>,
	/// Export format requested with `export=...`.
	pub export: Option<String>,
}

impl RequestParams {
	/// Extracts the parameters of `request`.
	///
	/// POST requests with a body are read from the body, everything else from
	/// the query string. `export` is always read from the query string.
	/// `default_length` applies when `length` is absent or negative (other
	/// than `-1`).
	///
	/// # Errors
	///
	/// Fails with [`TableError::InvalidParameter`] when `start`, `length` or an
	/// `order[i][column]` is not an integer.
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_tables::{DatatableRequest, RequestParams, SortDirection};
	///
	/// let request = DatatableRequest::get(
	///     "/t/?draw=4&start=20&length=-1&order[0][column]=2&order[0][dir]=desc",
	/// );
	/// let params = RequestParams::from_request(&request, 10).unwrap();
	///
	/// assert_eq!(params.draw, 4);
	/// assert_eq!(params.start, 20);
	/// assert_eq!(params.length, None);
	/// assert_eq!(params.order[0].column, 2);
	/// assert_eq!(params.order[0].direction, SortDirection::Desc);
	/// ```
	pub fn from_request(request: &DatatableRequest, default_length: usize) -> Result<Self> {
		let query = QueryDict::parse(&request.query);
		let dict = if request.uses_body() {
			QueryDict::from_bytes(&request.body)
		} else {
			query.clone()
		};

		let params = Self {
			draw: parse_draw(dict.get("draw")),
			start: parse_start(dict.get("start"))?,
			length: parse_length(dict.get("length"), default_length)?,
			search: search_term(&dict),
			order: parse_order(&dict)?,
			columns: parse_columns(&dict),
			additional_filters: parse_additional(&dict),
			export: query.get(EXPORT_PARAM).map(str::to_string),
		};
		tracing::debug!(
			draw = params.draw,
			start = params.start,
			length = ?params.length,
			order = params.order.len(),
			"Parsed table request parameters"
		);
		Ok(params)
	}

	/// Returns `true` when the request asks for an export.
	pub fn is_export(&self) -> bool {
		self.export.is_some()
	}
}

/// Reads only the `draw` token of `request`, tolerating every other malformed parameter.
///
/// Error responses echo this value when full parameter extraction failed.
pub fn draw_token(request: &DatatableRequest) -> i64 {
	let dict = if request.uses_body() {
		QueryDict::from_bytes(&request.body)
	} else {
		QueryDict::parse(&request.query)
	};
	parse_draw(dict.get("draw"))
}

fn parse_draw(value: Option<&str>) -> i64 {
	let Some(value) = value else {
		return 0;
	};
	value.trim().parse().unwrap_or_else(|_| {
		tracing::warn!(draw = value, "Ignoring non-numeric draw token");
		0
	})
}

fn parse_integer(name: &str, value: &str) -> Result<i64> {
	value
		.trim()
		.parse::<i64>()
		.map_err(|e| TableError::invalid_parameter(name, format!("'{}' is not an integer ({})", value, e)))
}

fn parse_start(value: Option<&str>) -> Result<usize> {
	match value {
		None => Ok(0),
		Some(value) => Ok(usize::try_from(parse_integer("start", value)?).unwrap_or(0)),
	}
}

fn parse_length(value: Option<&str>, default_length: usize) -> Result<Option<usize>> {
	let Some(value) = value else {
		return Ok(Some(default_length));
	};
	match parse_integer("length", value)? {
		-1 => Ok(None),
		n => Ok(Some(usize::try_from(n).unwrap_or(default_length))),
	}
}

fn search_term(dict: &QueryDict) -> Option<String> {
	let nested = dict
		.nested("search")
		.and_then(|search| search.get("value"))
		.and_then(Value::as_str);
	nested
		.or_else(|| dict.get("search[value]"))
		.filter(|term| !term.is_empty())
		.map(str::to_string)
}

fn entries(dict: &QueryDict, key: &str) -> Vec<Value> {
	match dict.nested(key) {
		Some(Value::Array(items)) => items.clone(),
		_ => Vec::new(),
	}
}

fn text(entry: &Value, key: &str) -> String {
	entry.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn flag(entry: &Value, key: &str) -> bool {
	entry.get(key).and_then(Value::as_str) == Some("true")
}

fn parse_order(dict: &QueryDict) -> Result<Vec<SortDescriptor>> {
	entries(dict, "order")
		.iter()
		.enumerate()
		.map(|(i, entry)| -> Result<SortDescriptor> {
			let name = format!("order[{}][column]", i);
			let raw = text(entry, "column");
			let column = parse_integer(&name, &raw)?;
			let column = usize::try_from(column)
				.map_err(|_| TableError::invalid_parameter(&name, "column index is negative"))?;
			Ok(SortDescriptor {
				column,
				direction: SortDirection::parse(&text(entry, "dir")),
			})
		})
		.collect()
}

fn parse_columns(dict: &QueryDict) -> Vec<ColumnRequestData> {
	entries(dict, "columns")
		.iter()
		.map(|entry| {
			let search = entry.get("search").cloned().unwrap_or(Value::Null);
			ColumnRequestData {
				name: text(entry, "name"),
				data: text(entry, "data"),
				searchable: flag(entry, "searchable"),
				orderable: flag(entry, "orderable"),
				search_value: text(&search, "value"),
				search_regex: flag(&search, "regex"),
			}
		})
		.collect()
}

fn parse_additional(dict: &QueryDict) -> IndexMap<String, Value> {
	match dict.nested("additional_data") {
		Some(Value::Object(map)) => map
			.iter()
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect(),
		Some(Value::String(encoded)) => QueryDict::parse(encoded)
			.pairs()
			.iter()
			.map(|(key, value)| (key.clone(), Value::String(value.clone())))
			.collect(),
		Some(other) => {
			tracing::warn!(additional_data = %display(other), "Ignoring malformed additional_data");
			IndexMap::new()
		}
		None => IndexMap::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn params(uri: &str) -> Result<RequestParams> {
		RequestParams::from_request(&DatatableRequest::get(uri), 10)
	}

	#[rstest]
	fn test_defaults() {
		let params = params("/t/").unwrap();
		assert_eq!(params.draw, 0);
		assert_eq!(params.start, 0);
		assert_eq!(params.length, Some(10));
		assert_eq!(params.search, None);
		assert!(params.order.is_empty());
		assert!(params.additional_filters.is_empty());
		assert!(!params.is_export());
	}

	#[rstest]
	#[case("/t/?start=-5", 0)]
	#[case("/t/?start=15", 15)]
	fn test_start(#[case] uri: &str, #[case] expected: usize) {
		assert_eq!(params(uri).unwrap().start, expected);
	}

	#[rstest]
	#[case("/t/?length=-1", None)]
	#[case("/t/?length=-7", Some(10))]
	#[case("/t/?length=500", Some(500))]
	fn test_length(#[case] uri: &str, #[case] expected: Option<usize>) {
		assert_eq!(params(uri).unwrap().length, expected);
	}

	#[rstest]
	#[case("/t/?start=abc")]
	#[case("/t/?length=ten")]
	#[case("/t/?order[0][column]=x&order[0][dir]=asc")]
	#[case("/t/?order[0][column]=-1")]
	fn test_invalid_parameters(#[case] uri: &str) {
		assert!(matches!(
			params(uri),
			Err(TableError::InvalidParameter { .. })
		));
	}

	#[rstest]
	fn test_non_numeric_draw_falls_back_to_zero() {
		assert_eq!(params("/t/?draw=abc").unwrap().draw, 0);
	}

	#[rstest]
	fn test_empty_search_is_none() {
		assert_eq!(params("/t/?search[value]=").unwrap().search, None);
		assert_eq!(
			params("/t/?search[value]=smi").unwrap().search.as_deref(),
			Some("smi")
		);
	}

	#[rstest]
	fn test_compound_order() {
		let params = params("/t/?order[0][column]=1&order[0][dir]=desc&order[1][column]=0").unwrap();
		assert_eq!(
			params.order,
			vec![
				SortDescriptor {
					column: 1,
					direction: SortDirection::Desc
				},
				SortDescriptor {
					column: 0,
					direction: SortDirection::Asc
				},
			]
		);
	}

	#[rstest]
	fn test_columns() {
		let params = params(
			"/t/?columns[0][name]=first&columns[0][data]=0&columns[0][searchable]=true\
			&columns[0][orderable]=false&columns[0][search][value]=x&columns[0][search][regex]=true",
		)
		.unwrap();
		assert_eq!(
			params.columns,
			vec![ColumnRequestData {
				name: "first".to_string(),
				data: "0".to_string(),
				searchable: true,
				orderable: false,
				search_value: "x".to_string(),
				search_regex: true,
			}]
		);
	}

	#[rstest]
	#[case("/t/?additional_data[status]=active&additional_data[dept]=7")]
	#[case("/t/?additional_data=status%3Dactive%26dept%3D7")]
	fn test_additional_data(#[case] uri: &str) {
		let params = params(uri).unwrap();
		assert_eq!(params.additional_filters.get("status"), Some(&json!("active")));
		assert_eq!(params.additional_filters.get("dept"), Some(&json!("7")));
	}

	#[rstest]
	fn test_post_body_takes_precedence() {
		let request = DatatableRequest::post("/t/?draw=1&length=5&export=excel", "draw=9&start=3");
		let params = RequestParams::from_request(&request, 10).unwrap();
		assert_eq!(params.draw, 9);
		assert_eq!(params.start, 3);
		assert_eq!(params.length, Some(10));
		assert_eq!(params.export.as_deref(), Some("excel"));
	}

	#[rstest]
	fn test_draw_token_survives_invalid_parameters() {
		let request = DatatableRequest::get("/t/?draw=6&start=abc");
		assert!(RequestParams::from_request(&request, 10).is_err());
		assert_eq!(draw_token(&request), 6);
	}

	#[rstest]
	fn test_post_without_body_reads_query() {
		let request = DatatableRequest::post("/t/?draw=2", "");
		let params = RequestParams::from_request(&request, 10).unwrap();
		assert_eq!(params.draw, 2);
	}
}
