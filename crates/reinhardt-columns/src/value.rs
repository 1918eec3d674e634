//! Cell and row value helpers.
//!
//! Rows travel through the pipeline as JSON objects keyed by data-source field
//! name, and every rendered cell is a [`Value`]. Markup-producing columns need a
//! plain string view of a value; [`display`] provides the conversion used
//! everywhere a value is interpolated into HTML or a URL.

pub use serde_json::Value;

/// One fetched record: data-source field name to raw value.
pub type Row = serde_json::Map<String, Value>;

/// Converts a value into the text that is interpolated into markup.
///
/// Strings are used verbatim, `null` becomes the empty string and every other
/// value uses its JSON representation.
///
/// # Examples
///
/// ```
/// use reinhardt_columns::value::display;
/// use serde_json::json;
///
/// assert_eq!(display(&json!("Alice")), "Alice");
/// assert_eq!(display(&json!(42)), "42");
/// assert_eq!(display(&json!(null)), "");
/// ```
pub fn display(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

/// Returns `true` when a value counts as "empty" for rendering purposes.
///
/// `null`, `false`, `0`, the empty string and empty collections are falsy.
pub fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
	}
}

/// Turns a declaration key into a display title.
///
/// Underscores become spaces. A letter following anything other than a letter
/// is capitalized and every other letter lower-cased, so `start_date` becomes
/// `Start Date` and `e-mail` becomes `E-Mail`.
///
/// # Examples
///
/// ```
/// use reinhardt_columns::value::humanize;
///
/// assert_eq!(humanize("first_name"), "First Name");
/// assert_eq!(humanize("ID"), "Id");
/// assert_eq!(humanize("e-mail"), "E-Mail");
/// ```
pub fn humanize(key: &str) -> String {
	let mut title = String::with_capacity(key.len());
	let mut after_letter = false;
	for ch in key.chars() {
		let ch = if ch == '_' { ' ' } else { ch };
		if after_letter {
			title.extend(ch.to_lowercase());
		} else {
			title.extend(ch.to_uppercase());
		}
		after_letter = ch.is_alphabetic();
	}
	title
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("first_name", "First Name")]
	#[case("manager", "Manager")]
	#[case("start__date", "Start  Date")]
	#[case("", "")]
	#[case("e-mail", "E-Mail")]
	#[case("address2line", "Address2Line")]
	#[case("o'neil_ID", "O'Neil Id")]
	fn test_humanize(#[case] key: &str, #[case] expected: &str) {
		assert_eq!(humanize(key), expected);
	}

	#[rstest]
	#[case(json!(null), true)]
	#[case(json!(""), true)]
	#[case(json!(0), true)]
	#[case(json!([]), true)]
	#[case(json!("2024-01-01"), false)]
	#[case(json!(true), false)]
	fn test_is_falsy(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_falsy(&value), expected);
	}

	#[rstest]
	fn test_display_nested_value_uses_json() {
		assert_eq!(display(&json!(["a", "b"])), r#"["a","b"]"#);
	}
}
