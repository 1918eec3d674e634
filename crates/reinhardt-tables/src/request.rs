//! The slice of an HTTP request the pipeline reads

use bytes::Bytes;
use http::Method;

/// Method, path, query string and body of an incoming table request.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use reinhardt_tables::DatatableRequest;
///
/// let request = DatatableRequest::get("/employees/data/?draw=3&start=0&length=25");
/// assert_eq!(request.method, Method::GET);
/// assert_eq!(request.path, "/employees/data/");
/// assert_eq!(request.query, "draw=3&start=0&length=25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatatableRequest {
	/// HTTP method.
	pub method: Method,
	/// Request path without the query string.
	pub path: String,
	/// Raw query string, without the leading `?`.
	pub query: String,
	/// Raw body; form-encoded for POST requests.
	pub body: Bytes,
}

impl DatatableRequest {
	/// Creates a request with no body.
	pub fn new(method: Method, uri: &str) -> Self {
		let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
		Self {
			method,
			path: path.to_string(),
			query: query.to_string(),
			body: Bytes::new(),
		}
	}

	/// Creates a GET request for `uri`.
	pub fn get(uri: &str) -> Self {
		Self::new(Method::GET, uri)
	}

	/// Creates a POST request for `uri` with a form-encoded `body`.
	pub fn post(uri: &str, body: impl Into<Bytes>) -> Self {
		Self::new(Method::POST, uri).with_body(body)
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Captures the parts of an `http::Request` the pipeline needs.
	pub fn from_http<B: AsRef<[u8]>>(request: &http::Request<B>) -> Self {
		let uri = request.uri();
		Self {
			method: request.method().clone(),
			path: uri.path().to_string(),
			query: uri.query().unwrap_or_default().to_string(),
			body: Bytes::copy_from_slice(request.body().as_ref()),
		}
	}

	/// Returns `true` when parameters come from the body rather than the query string.
	pub fn uses_body(&self) -> bool {
		self.method == Method::POST && !self.body.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_http() {
		let request = http::Request::builder()
			.method(Method::POST)
			.uri("https://example.com/people/?export=excel")
			.body(b"draw=1".to_vec())
			.unwrap();

		let captured = DatatableRequest::from_http(&request);

		assert_eq!(captured.method, Method::POST);
		assert_eq!(captured.path, "/people/");
		assert_eq!(captured.query, "export=excel");
		assert_eq!(captured.body, Bytes::from_static(b"draw=1"));
		assert!(captured.uses_body());
	}

	#[rstest]
	#[case(DatatableRequest::get("/t/?draw=1"), false)]
	#[case(DatatableRequest::post("/t/", ""), false)]
	#[case(DatatableRequest::post("/t/", "draw=1"), true)]
	fn test_uses_body(#[case] request: DatatableRequest, #[case] expected: bool) {
		assert_eq!(request.uses_body(), expected);
	}
}
