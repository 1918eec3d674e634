//! JSON envelope and never-cache responses

use crate::settings::ViewSettings;
use bytes::Bytes;
use chrono::Utc;
use http::header::{CACHE_CONTROL, CONTENT_TYPE, EXPIRES, HeaderValue};
use http::{Response, StatusCode};
use reinhardt_columns::Value;
use reinhardt_tables::{PipelinePayload, TableError};
use serde::{Deserialize, Serialize};

/// `Cache-Control` sent with every table response.
pub const NEVER_CACHE: &str = "max-age=0, no-cache, no-store, must-revalidate, private";

/// Outcome marker of a table response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
	/// The pipeline succeeded.
	Ok,
	/// The pipeline failed; see `error`.
	Error,
}

/// Wire envelope of a table data request.
///
/// Failed requests keep the same shape with zero counts and no rows, so client
/// code only has to look at `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatatableResponse {
	/// Echoed `draw` token.
	pub draw: i64,
	/// Record count before filters.
	pub records_total: usize,
	/// Record count after filters.
	pub records_filtered: usize,
	/// Rendered rows.
	pub data: Vec<Vec<Value>>,
	/// Outcome marker.
	pub result: ResponseStatus,
	/// Error text, present only on failure.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl DatatableResponse {
	/// Wraps a successful payload.
	pub fn ok(payload: PipelinePayload) -> Self {
		Self {
			draw: payload.draw,
			records_total: payload.records_total,
			records_filtered: payload.records_filtered,
			data: payload.data,
			result: ResponseStatus::Ok,
			error: None,
		}
	}

	/// Builds the error shape carrying `message`.
	pub fn error(draw: i64, message: impl Into<String>) -> Self {
		let PipelinePayload {
			records_total,
			records_filtered,
			data,
			..
		} = PipelinePayload::empty(draw);
		Self {
			draw,
			records_total,
			records_filtered,
			data,
			result: ResponseStatus::Error,
			error: Some(message.into()),
		}
	}

	/// Converts a pipeline result, exposing error detail only in debug mode.
	pub fn from_result(
		result: Result<PipelinePayload, TableError>,
		draw: i64,
		settings: &ViewSettings,
	) -> Self {
		match result {
			Ok(payload) => Self::ok(payload),
			Err(error) => Self::error(draw, error_text(&error, settings)),
		}
	}

	/// Returns `true` for a successful response.
	pub fn is_ok(&self) -> bool {
		self.result == ResponseStatus::Ok
	}
}

/// Renders `error` for the client: the full chain in debug mode, otherwise the
/// configured generic message.
pub fn error_text(error: &(dyn std::error::Error + 'static), settings: &ViewSettings) -> String {
	if !settings.debug {
		return settings.error_message.clone();
	}
	let mut text = error_chain(error);
	text.push_str(&format!("\n\n{:#?}", error));
	text
}

/// Joins the messages of `error` and each of its sources.
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::{QueryError, TableError};
/// use reinhardt_tables_views::response::error_chain;
///
/// let error = TableError::Query(QueryError::Backend("db down".to_string()));
/// assert!(error_chain(&error).contains("Caused by: "));
/// ```
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
	let mut text = error.to_string();
	let mut source = error.source();
	while let Some(cause) = source {
		text.push_str("\n\nCaused by: ");
		text.push_str(&cause.to_string());
		source = cause.source();
	}
	text
}

/// Serializes `body` into a never-cache `200 OK` JSON response.
///
/// If serialization fails the body is a `{"result": "error", "sError", "text"}`
/// object instead; the status stays `200`.
pub fn json_response<T: Serialize + ?Sized>(body: &T) -> Response<Bytes> {
	let bytes = match serde_json::to_vec(body) {
		Ok(bytes) => bytes,
		Err(e) => {
			tracing::error!(error = %e, "Failed to serialize table response");
			serialization_fallback(&e).into_bytes()
		}
	};
	let mut response = Response::new(Bytes::from(bytes));
	*response.status_mut() = StatusCode::OK;
	response
		.headers_mut()
		.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	add_never_cache_headers(&mut response);
	response
}

fn serialization_fallback(error: &serde_json::Error) -> String {
	let message = format!("Internal error: {}", error);
	serde_json::json!({
		"result": "error",
		"sError": message,
		"text": message,
	})
	.to_string()
}

/// Marks `response` as never cacheable.
pub fn add_never_cache_headers<B>(response: &mut Response<B>) {
	let headers = response.headers_mut();
	headers.insert(CACHE_CONTROL, HeaderValue::from_static(NEVER_CACHE));
	let now = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
	if let Ok(value) = HeaderValue::from_str(&now) {
		headers.insert(EXPIRES, value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_json_diff::assert_json_eq;
	use reinhardt_tables::QueryError;
	use rstest::rstest;
	use serde::ser::Error as _;
	use serde_json::json;

	#[rstest]
	fn test_ok_envelope() {
		let payload = PipelinePayload {
			draw: 5,
			records_total: 3,
			records_filtered: 2,
			data: vec![vec![json!("A")]],
		};

		let envelope = DatatableResponse::from_result(Ok(payload), 5, &ViewSettings::default());

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({
				"draw": 5,
				"recordsTotal": 3,
				"recordsFiltered": 2,
				"data": [["A"]],
				"result": "ok"
			})
		);
	}

	#[rstest]
	fn test_error_envelope_hides_detail() {
		let error = TableError::Query(QueryError::Backend("db down".to_string()));

		let envelope = DatatableResponse::from_result(Err(error), 7, &ViewSettings::default());

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({
				"draw": 7,
				"recordsTotal": 0,
				"recordsFiltered": 0,
				"data": [],
				"result": "error",
				"error": "An error occurred while processing an AJAX request."
			})
		);
	}

	#[rstest]
	fn test_debug_error_text_includes_chain() {
		let error = TableError::Query(QueryError::Backend("db down".to_string()));

		let text = error_text(&error, &ViewSettings::debug());

		assert!(text.starts_with("Query error: Data source error: db down"));
		assert!(text.contains("Caused by: Data source error: db down"));
		assert!(text.contains("Backend"));
	}

	#[rstest]
	fn test_json_response_headers() {
		let response = json_response(&json!({"result": "ok"}));

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
		assert_eq!(response.headers()[CACHE_CONTROL], NEVER_CACHE);
		assert!(response.headers().contains_key(EXPIRES));
	}

	struct Unserializable;

	impl Serialize for Unserializable {
		fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
			Err(S::Error::custom("cannot encode cell"))
		}
	}

	#[rstest]
	fn test_serialization_failure_falls_back() {
		let response = json_response(&Unserializable);

		let body: Value = serde_json::from_slice(response.body()).unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(body["result"], json!("error"));
		assert_eq!(body["sError"], json!("Internal error: cannot encode cell"));
		assert_eq!(body["text"], body["sError"]);
	}
}
