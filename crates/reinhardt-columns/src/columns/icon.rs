//! Icon columns for the Glyphicon and Font Awesome icon fonts

use crate::column::{Column, ColumnOptions, option_attribute};
use crate::value::Value;

macro_rules! icon_column {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone)]
		pub struct $name {
			options: ColumnOptions,
			icon: String,
		}

		impl $name {
			/// Returns the icon name after normalization
			pub fn icon(&self) -> &str {
				&self.icon
			}
		}

		impl Column for $name {
			fn options(&self) -> &ColumnOptions {
				&self.options
			}

			fn options_mut(&mut self) -> &mut ColumnOptions {
				&mut self.options
			}

			fn render_column(&self, _value: Value) -> Value {
				Value::String(self.markup())
			}

			fn is_data_independent(&self) -> bool {
				true
			}

			fn attribute(&self, name: &str) -> Option<Value> {
				match name {
					"icon" => Some(Value::String(self.icon.clone())),
					_ => option_attribute(&self.options, name),
				}
			}
		}
	};
}

icon_column! {
	/// Bootstrap 3 glyphicon, e.g. `GlyphiconColumn::new("pencil")`
	GlyphiconColumn
}

icon_column! {
	/// Font Awesome 4 icon; a leading `fa-` on the icon name is optional
	FontAwesome4Column
}

icon_column! {
	/// Font Awesome 5 icon given by its full class list, e.g. `"fas fa-user"`
	FontAwesome5Column
}

impl GlyphiconColumn {
	/// Creates a column rendering `icon` in every row
	pub fn new(icon: impl Into<String>) -> Self {
		Self {
			options: ColumnOptions::default(),
			icon: icon.into(),
		}
	}

	fn markup(&self) -> String {
		format!("<span class='glyphicon glyphicon-{}'></span>", self.icon)
	}
}

impl FontAwesome4Column {
	/// Creates a column rendering `icon` in every row
	pub fn new(icon: impl Into<String>) -> Self {
		let icon = icon.into();
		let icon = icon.strip_prefix("fa-").map(str::to_string).unwrap_or(icon);
		Self {
			options: ColumnOptions::default(),
			icon,
		}
	}

	fn markup(&self) -> String {
		format!(r#"<i class="fa fa-{}" aria-hidden="true"></i>"#, self.icon)
	}
}

impl FontAwesome5Column {
	/// Creates a column rendering `icon` in every row
	pub fn new(icon: impl Into<String>) -> Self {
		Self {
			options: ColumnOptions::default(),
			icon: icon.into(),
		}
	}

	fn markup(&self) -> String {
		format!(r#"<i class="{}"></i>"#, self.icon)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_glyphicon_markup() {
		let column = GlyphiconColumn::new("pencil");
		assert_eq!(
			column.render_column(json!(null)),
			json!("<span class='glyphicon glyphicon-pencil'></span>")
		);
	}

	#[rstest]
	#[case("fa-user")]
	#[case("user")]
	fn test_font_awesome4_strips_prefix(#[case] icon: &str) {
		let column = FontAwesome4Column::new(icon);
		assert_eq!(column.icon(), "user");
		assert_eq!(
			column.render_column(json!("ignored")),
			json!(r#"<i class="fa fa-user" aria-hidden="true"></i>"#)
		);
	}

	#[rstest]
	fn test_font_awesome5_uses_class_list() {
		let column = FontAwesome5Column::new("fas fa-user");
		assert_eq!(
			column.render_column(json!(null)),
			json!(r#"<i class="fas fa-user"></i>"#)
		);
	}

	#[rstest]
	fn test_icon_columns_are_data_independent() {
		assert!(GlyphiconColumn::new("x").is_data_independent());
		assert!(FontAwesome4Column::new("x").is_data_independent());
		assert!(FontAwesome5Column::new("x").is_data_independent());
	}

	#[rstest]
	fn test_icon_attribute_available_to_links() {
		let column = FontAwesome4Column::new("fa-edit");
		assert_eq!(column.attribute("icon"), Some(json!("edit")));
		assert_eq!(column.attribute("missing"), None);
	}
}
