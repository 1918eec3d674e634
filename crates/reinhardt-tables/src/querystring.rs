//! Form-encoded parameter decoding with bracket-key nesting
//!
//! Grid widgets send structured parameters as bracketed keys:
//!
//! ```text
//! order[0][column]=1&order[0][dir]=desc&columns[0][search][value]=x
//! ```
//!
//! [`QueryDict`] keeps the decoded pairs as sent and also folds them into a
//! JSON tree, where objects whose keys are all indices become arrays.

use reinhardt_columns::Value;
use serde_json::Map;

/// Decoded form parameters.
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::QueryDict;
/// use serde_json::json;
///
/// let dict = QueryDict::parse("order[0][column]=1&order[0][dir]=desc&draw=2");
/// assert_eq!(dict.get("draw"), Some("2"));
/// assert_eq!(
///     dict.nested("order"),
///     Some(&json!([{"column": "1", "dir": "desc"}]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDict {
	pairs: Vec<(String, String)>,
	tree: Map<String, Value>,
}

impl QueryDict {
	/// Decodes an `application/x-www-form-urlencoded` string.
	pub fn parse(input: &str) -> Self {
		Self::from_bytes(input.as_bytes())
	}

	/// Decodes form-encoded bytes.
	pub fn from_bytes(input: &[u8]) -> Self {
		let pairs: Vec<(String, String)> = url::form_urlencoded::parse(input)
			.into_owned()
			.collect();
		let mut tree = Map::new();
		for (key, value) in &pairs {
			insert(&mut tree, &split_key(key), value.clone());
		}
		let tree = tree
			.into_iter()
			.map(|(key, value)| (key, arrayify(value)))
			.collect();
		Self { pairs, tree }
	}

	/// Returns the last value sent for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.rev()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Returns every value sent for `key`, in order.
	pub fn get_all(&self, key: &str) -> Vec<&str> {
		self.pairs
			.iter()
			.filter(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
			.collect()
	}

	/// Returns the nested value rooted at `key`.
	pub fn nested(&self, key: &str) -> Option<&Value> {
		self.tree.get(key)
	}

	/// Returns the decoded pairs in the order they were sent.
	pub fn pairs(&self) -> &[(String, String)] {
		&self.pairs
	}

	/// Returns `true` if no parameters were sent.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}
}

/// Splits `a[b][c]` into `["a", "b", "c"]`. Malformed keys stay whole.
fn split_key(key: &str) -> Vec<&str> {
	let Some(open) = key.find('[') else {
		return vec![key];
	};
	if open == 0 {
		return vec![key];
	}
	let mut parts = vec![&key[..open]];
	let mut rest = &key[open..];
	while let Some(inner) = rest.strip_prefix('[') {
		let Some(close) = inner.find(']') else {
			return vec![key];
		};
		parts.push(&inner[..close]);
		rest = &inner[close + 1..];
	}
	if rest.is_empty() { parts } else { vec![key] }
}

fn insert(tree: &mut Map<String, Value>, path: &[&str], value: String) {
	let Some((head, rest)) = path.split_first() else {
		return;
	};
	// `key[]` appends after the highest index already present
	let head = if head.is_empty() {
		next_index(tree).to_string()
	} else {
		(*head).to_string()
	};
	if rest.is_empty() {
		if !matches!(tree.get(&head), Some(Value::Object(_))) {
			tree.insert(head, Value::String(value));
		}
		return;
	}
	let entry = tree
		.entry(head)
		.or_insert_with(|| Value::Object(Map::new()));
	if !entry.is_object() {
		*entry = Value::Object(Map::new());
	}
	if let Value::Object(child) = entry {
		insert(child, rest, value);
	}
}

fn next_index(tree: &Map<String, Value>) -> usize {
	tree.keys()
		.filter_map(|key| key.parse::<usize>().ok())
		.max()
		.map_or(0, |highest| highest + 1)
}

fn arrayify(value: Value) -> Value {
	let Value::Object(map) = value else {
		return value;
	};
	let indexed: Option<Vec<(usize, Value)>> = map
		.iter()
		.map(|(key, value)| key.parse::<usize>().ok().map(|index| (index, value.clone())))
		.collect();
	match indexed {
		Some(mut items) if !items.is_empty() => {
			items.sort_by_key(|(index, _)| *index);
			Value::Array(items.into_iter().map(|(_, value)| arrayify(value)).collect())
		}
		_ => Value::Object(
			map.into_iter()
				.map(|(key, value)| (key, arrayify(value)))
				.collect(),
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("draw", vec!["draw"])]
	#[case("order[0][dir]", vec!["order", "0", "dir"])]
	#[case("ids[]", vec!["ids", ""])]
	#[case("[0]", vec!["[0]"])]
	#[case("a[b", vec!["a[b"])]
	#[case("a[b]c", vec!["a[b]c"])]
	fn test_split_key(#[case] key: &str, #[case] expected: Vec<&str>) {
		assert_eq!(split_key(key), expected);
	}

	#[rstest]
	fn test_columns_become_array_in_index_order() {
		let dict = QueryDict::parse(
			"columns[1][name]=last&columns[0][name]=first&columns[0][search][value]=a%20b",
		);
		assert_eq!(
			dict.nested("columns"),
			Some(&json!([
				{"name": "first", "search": {"value": "a b"}},
				{"name": "last"}
			]))
		);
	}

	#[rstest]
	fn test_flat_lookup_uses_raw_keys() {
		let dict = QueryDict::parse("search%5Bvalue%5D=smith&search[regex]=false");
		assert_eq!(dict.get("search[value]"), Some("smith"));
		assert_eq!(dict.nested("search"), Some(&json!({"value": "smith", "regex": "false"})));
	}

	#[rstest]
	fn test_repeated_key_keeps_all_values() {
		let dict = QueryDict::parse("tag=a&tag=b");
		assert_eq!(dict.get("tag"), Some("b"));
		assert_eq!(dict.get_all("tag"), vec!["a", "b"]);
	}

	#[rstest]
	fn test_append_syntax() {
		let dict = QueryDict::parse("ids[]=3&ids[]=4");
		assert_eq!(dict.nested("ids"), Some(&json!(["3", "4"])));
	}

	#[rstest]
	#[case("a[1]=x&a[]=y", json!(["x", "y"]))]
	#[case("a[]=x&a[0]=y&a[]=z", json!(["y", "z"]))]
	#[case("a[5]=x&a[]=y&a[]=z", json!(["x", "y", "z"]))]
	fn test_append_after_explicit_index(#[case] query: &str, #[case] expected: Value) {
		// Act
		let dict = QueryDict::parse(query);

		// Assert
		assert_eq!(dict.nested("a"), Some(&expected));
	}

	#[rstest]
	fn test_empty_input() {
		let dict = QueryDict::parse("");
		assert!(dict.is_empty());
		assert_eq!(dict.nested("order"), None);
	}
}
