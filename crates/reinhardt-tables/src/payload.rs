//! Pipeline output

use reinhardt_columns::Value;
use serde::{Deserialize, Serialize};

/// Counts and rendered rows of one data request.
///
/// Serializes with the field names grid widgets expect:
///
/// ```rust
/// use reinhardt_tables::PipelinePayload;
/// use serde_json::json;
///
/// let payload = PipelinePayload {
///     draw: 2,
///     records_total: 3,
///     records_filtered: 1,
///     data: vec![vec![json!("A")]],
/// };
/// assert_eq!(
///     serde_json::to_value(&payload).unwrap(),
///     json!({"draw": 2, "recordsTotal": 3, "recordsFiltered": 1, "data": [["A"]]})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinePayload {
	/// Echoed `draw` token.
	pub draw: i64,
	/// Record count before any filter.
	pub records_total: usize,
	/// Record count after search and custom filters, before paging.
	pub records_filtered: usize,
	/// Rendered rows; each row lists its cells in column order.
	pub data: Vec<Vec<Value>>,
}

impl PipelinePayload {
	/// Zero counts and no rows, echoing `draw`.
	pub fn empty(draw: i64) -> Self {
		Self {
			draw,
			..Self::default()
		}
	}
}
