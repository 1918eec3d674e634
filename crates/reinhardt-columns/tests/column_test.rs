//! Integration tests for column rendering and links

use reinhardt_columns::{
	CheckBoxColumn, Column, ColumnError, ColumnExt, FontAwesome4Column, NoRoutes, RouteTable, Row,
	TextColumn,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn routes() -> RouteTable {
	RouteTable::new()
		.route("detail", "/employees/{id}/")
		.route("action", "/employees/{id}/{action}/")
}

#[fixture]
fn employee() -> Row {
	let mut row = Row::new();
	row.insert("id".to_string(), json!(42));
	row.insert("name".to_string(), json!("X"));
	row
}

#[rstest]
fn test_link_wraps_rendered_name(routes: RouteTable, employee: Row) {
	// Arrange
	let column = TextColumn::new().link("detail", ["id"]);
	let rendered = column.render_column(employee["name"].clone());

	// Act
	let cell = column.render_link(rendered, &employee, &routes).unwrap();

	// Assert
	assert_eq!(cell, json!(r#"<a href="/employees/42/">X</a>"#));
}

#[rstest]
fn test_link_mixes_literal_and_field_arguments(routes: RouteTable, employee: Row) {
	// Arrange
	let column = FontAwesome4Column::new("fa-trash").link("action", ["id", "#delete"]);
	let rendered = column.render_column(json!(null));

	// Act
	let cell = column.render_link(rendered, &employee, &routes).unwrap();

	// Assert
	assert_eq!(
		cell,
		json!(r#"<a href="/employees/42/delete/"><i class="fa fa-trash" aria-hidden="true"></i></a>"#)
	);
}

#[rstest]
fn test_unconfigured_resolver_reports_route(employee: Row) {
	let column = TextColumn::new().link("detail", ["id"]);

	let error = column.render_link(json!("X"), &employee, &NoRoutes).unwrap_err();

	assert_eq!(error, ColumnError::NoReverseMatch("detail".to_string()));
}

#[rstest]
fn test_checkbox_with_link_references_both_fields() {
	let column = CheckBoxColumn::new("id").link("detail", ["manager_id"]);

	assert_eq!(column.referenced_values(), vec!["id", "manager_id"]);
}
