//! Link arguments and URL reversal.
//!
//! A linked column names a route and a list of argument specifiers. At render
//! time each specifier is resolved against the column itself or the current row,
//! the route is reversed into a URL through a [`UrlResolver`], and the rendered
//! cell is wrapped in an anchor.

use crate::error::{ColumnError, Result};
use crate::value::{Row, Value, display};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::HashMap;
use std::fmt;

/// Characters escaped when a resolved argument is placed into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// One link argument specifier.
///
/// Specifiers are written as strings: `#text` is a literal, `.name` reads an
/// attribute of the column, anything else is looked up in the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkArg {
	/// Literal text passed through unchanged.
	Literal(String),
	/// An attribute of the column descriptor (see `Column::attribute`).
	Attribute(String),
	/// A field of the current row.
	Field(String),
}

impl LinkArg {
	/// Parses a specifier string.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_columns::LinkArg;
	///
	/// assert_eq!(LinkArg::parse("#edit"), LinkArg::Literal("edit".to_string()));
	/// assert_eq!(LinkArg::parse(".title"), LinkArg::Attribute("title".to_string()));
	/// assert_eq!(LinkArg::parse("id"), LinkArg::Field("id".to_string()));
	/// ```
	pub fn parse(spec: &str) -> Self {
		if let Some(literal) = spec.strip_prefix('#') {
			Self::Literal(literal.to_string())
		} else if let Some(attribute) = spec.strip_prefix('.') {
			Self::Attribute(attribute.to_string())
		} else {
			Self::Field(spec.to_string())
		}
	}

	/// Returns the row field this argument reads, if any.
	pub fn field(&self) -> Option<&str> {
		match self {
			Self::Field(name) => Some(name),
			_ => None,
		}
	}

	/// Resolves the argument to its URL text.
	///
	/// `attribute` looks up column attributes for [`LinkArg::Attribute`].
	pub fn resolve(
		&self,
		row: &Row,
		attribute: impl Fn(&str) -> Option<Value>,
	) -> Result<String> {
		match self {
			Self::Literal(text) => Ok(text.clone()),
			Self::Attribute(name) => attribute(name)
				.map(|value| display(&value))
				.ok_or_else(|| ColumnError::UnknownAttribute(name.clone())),
			Self::Field(name) => row
				.get(name)
				.map(display)
				.ok_or_else(|| ColumnError::MissingField {
					field: name.clone(),
				}),
		}
	}
}

impl From<&str> for LinkArg {
	fn from(spec: &str) -> Self {
		Self::parse(spec)
	}
}

impl From<String> for LinkArg {
	fn from(spec: String) -> Self {
		Self::parse(&spec)
	}
}

impl fmt::Display for LinkArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(text) => write!(f, "#{}", text),
			Self::Attribute(name) => write!(f, ".{}", name),
			Self::Field(name) => f.write_str(name),
		}
	}
}

/// Reverses a named route into a URL.
pub trait UrlResolver: Send + Sync {
	/// Builds the URL for `name` with positional `args`.
	fn reverse(&self, name: &str, args: &[String]) -> Result<String>;
}

/// A resolver that knows no routes.
///
/// Used when a table links columns but never configured a resolver; every
/// reversal fails with [`ColumnError::NoReverseMatch`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRoutes;

impl UrlResolver for NoRoutes {
	fn reverse(&self, name: &str, _args: &[String]) -> Result<String> {
		Err(ColumnError::NoReverseMatch(name.to_string()))
	}
}

/// Named URL patterns with `{placeholder}` segments.
///
/// Placeholders are filled positionally, so the names inside the braces only
/// document the pattern. Arguments are percent-encoded for use in a path.
///
/// # Examples
///
/// ```
/// use reinhardt_columns::{RouteTable, UrlResolver};
///
/// let routes = RouteTable::new()
///     .route("employee_detail", "/employees/{id}/")
///     .route("employee_tab", "/employees/{id}/{tab}/");
///
/// let url = routes
///     .reverse("employee_tab", &["7".to_string(), "history".to_string()])
///     .unwrap();
/// assert_eq!(url, "/employees/7/history/");
/// ```
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
	patterns: HashMap<String, String>,
}

impl RouteTable {
	/// Creates an empty route table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a named pattern.
	pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.patterns.insert(name.into(), pattern.into());
		self
	}

	/// Returns the pattern registered under `name`.
	pub fn pattern(&self, name: &str) -> Option<&str> {
		self.patterns.get(name).map(String::as_str)
	}
}

/// Counts the `{...}` placeholders in a pattern.
fn placeholder_count(pattern: &str) -> usize {
	let mut count = 0;
	let mut chars = pattern.chars();
	while let Some(ch) = chars.next() {
		if ch == '{' {
			chars.by_ref().take_while(|&c| c != '}').for_each(drop);
			count += 1;
		}
	}
	count
}

impl UrlResolver for RouteTable {
	fn reverse(&self, name: &str, args: &[String]) -> Result<String> {
		let pattern = self
			.pattern(name)
			.ok_or_else(|| ColumnError::NoReverseMatch(name.to_string()))?;

		let expected = placeholder_count(pattern);
		if expected != args.len() {
			return Err(ColumnError::InvalidRouteArgument {
				route: name.to_string(),
				message: format!("expected {} arguments, got {}", expected, args.len()),
			});
		}

		let mut result = String::with_capacity(pattern.len());
		let mut args = args.iter();
		let mut chars = pattern.chars();
		while let Some(ch) = chars.next() {
			if ch == '{' {
				chars.by_ref().take_while(|&c| c != '}').for_each(drop);
				if let Some(arg) = args.next() {
					result.extend(utf8_percent_encode(arg, PATH_SEGMENT));
				}
			} else {
				result.push(ch);
			}
		}
		Ok(result)
	}
}

/// Wraps already-rendered cell text in an anchor pointing at `url`.
pub fn anchor(url: &str, text: &Value) -> String {
	format!(r#"<a href="{}">{}</a>"#, url, display(text))
}
